//! The salted, iterated password hash stored for protected rooms.

use std::fmt;

use hmac::Hmac;
use rand::Rng;
use sha2::Sha512;

use crate::{CredentialError, KdfParams, SALT_LEN};

/// A one-way password credential.
///
/// Holds the salt, the derivation parameters, and the derived hash. There is
/// deliberately no way to get the password back out.
#[derive(Clone)]
pub struct Credential {
    salt: [u8; SALT_LEN],
    params: KdfParams,
    hash: Vec<u8>,
}

impl Credential {
    /// Derives a credential for `password` with a fresh random salt.
    ///
    /// This is slow on purpose (see [`KdfParams`]). Callers on an async
    /// runtime should run it on a blocking thread.
    ///
    /// # Errors
    /// [`CredentialError::InvalidParams`] if `params` can't produce a hash.
    pub fn derive(password: &str, params: &KdfParams) -> Result<Self, CredentialError> {
        Self::derive_with_salt(password, generate_salt(), params)
    }

    /// Derives a credential for `password` with a caller-supplied salt.
    ///
    /// Deterministic: the same inputs always produce the same hash.
    pub fn derive_with_salt(
        password: &str,
        salt: [u8; SALT_LEN],
        params: &KdfParams,
    ) -> Result<Self, CredentialError> {
        let hash = derive_hash(password.as_bytes(), &salt, params)?;
        Ok(Self {
            salt,
            params: *params,
            hash,
        })
    }

    /// Checks `password` against this credential.
    ///
    /// Re-derives with the stored salt and the stored parameters, then
    /// compares the hashes. Returns `Ok(false)` on a mismatch.
    pub fn verify(&self, password: &str) -> Result<bool, CredentialError> {
        let candidate = derive_hash(password.as_bytes(), &self.salt, &self.params)?;
        let matches = candidate == self.hash;
        if !matches {
            tracing::debug!("credential mismatch");
        }
        Ok(matches)
    }

    /// The salt this credential was derived with.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// The parameters this credential was derived with.
    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// The derived hash.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

fn derive_hash(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<Vec<u8>, CredentialError> {
    if !params.is_usable() {
        return Err(CredentialError::InvalidParams(format!(
            "iterations={}, output_len={}",
            params.iterations, params.output_len
        )));
    }

    let mut out = vec![0u8; params.output_len];
    pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, params.iterations, &mut out)
        .map_err(|e| CredentialError::Derivation(e.to_string()))?;
    Ok(out)
}

/// Generates a random salt from the thread-local RNG.
fn generate_salt() -> [u8; SALT_LEN] {
    rand::rng().random()
}

// =========================================================================
// Tests
// =========================================================================
