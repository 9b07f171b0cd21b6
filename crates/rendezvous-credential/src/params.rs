//! Key-derivation parameters.

/// Length of the random salt generated for each credential, in bytes.
pub const SALT_LEN: usize = 16;

/// Cost settings for PBKDF2-HMAC-SHA512.
///
/// Each credential remembers the parameters it was derived with, so raising
/// the defaults later doesn't lock anyone out of an existing room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of PBKDF2 rounds.
    pub iterations: u32,

    /// Length of the derived hash in bytes.
    pub output_len: usize,
}

impl KdfParams {
    /// Production round count.
    pub const DEFAULT_ITERATIONS: u32 = 100_000;

    /// Production hash length (one full SHA-512 block).
    pub const DEFAULT_OUTPUT_LEN: usize = 64;

    /// Returns `true` if these parameters can produce a hash at all.
    pub fn is_usable(&self) -> bool {
        self.iterations > 0 && self.output_len > 0
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            output_len: Self::DEFAULT_OUTPUT_LEN,
        }
    }
}
