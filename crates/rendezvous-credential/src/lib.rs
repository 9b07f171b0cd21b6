//! Room password credentials for Rendezvous.
//!
//! A password-protected room never stores its password. It stores a
//! [`Credential`]: a random salt, the parameters of a slow key-derivation
//! function, and the hash that function produced. Checking a join attempt
//! means running the same derivation on the offered password and comparing
//! hashes.
//!
//! # How it fits in the stack
//!
//! ```text
//! Registry (above)  ← stores one Option<Credential> per room
//!     ↕
//! Credential (this crate)  ← derive / verify
//! ```

mod credential;
mod error;
mod params;

pub use credential::Credential;
pub use error::CredentialError;
pub use params::{KdfParams, SALT_LEN};
