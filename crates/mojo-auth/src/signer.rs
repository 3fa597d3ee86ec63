//! Keyed digests over usernames

use std::fmt::{Debug, Display, Formatter};

use aws_lc_rs::constant_time::verify_slices_are_equal;
use aws_lc_rs::hmac;

use crate::encoding::Encoding;
use crate::secret::Secret;

/// The HMAC construction used to derive passwords.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// HMAC-SHA1, 20 byte digest. Required to interoperate with existing deployments.
    #[default]
    HmacSha1,

    /// HMAC-SHA256, 32 byte digest. Passwords are not accepted by `HmacSha1` verifiers.
    HmacSha256,
}

impl Algorithm {
    fn hmac_algorithm(&self) -> hmac::Algorithm {
        match self {
            Algorithm::HmacSha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Algorithm::HmacSha256 => hmac::HMAC_SHA256,
        }
    }

    pub fn digest_len(&self) -> usize {
        match self {
            Algorithm::HmacSha1 => 20,
            Algorithm::HmacSha256 => 32,
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::HmacSha1 => write!(f, "hmac-sha1"),
            Algorithm::HmacSha256 => write!(f, "hmac-sha256"),
        }
    }
}

/// Wire-affecting choices of the signer. The default matches deployed verifiers.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct SignerOptions {
    pub algorithm: Algorithm,
    pub encoding: Encoding,
}

/// Maps a message to its encoded HMAC under a fixed secret.
#[derive(Clone)]
pub struct Signer {
    key: hmac::Key,
    options: SignerOptions,
}

impl Signer {
    pub fn new(secret: &Secret) -> Self {
        Self::with_options(secret, SignerOptions::default())
    }

    pub fn with_options(secret: &Secret, options: SignerOptions) -> Self {
        let key = hmac::Key::new(options.algorithm.hmac_algorithm(), secret.expose());
        Self { key, options }
    }

    pub fn options(&self) -> SignerOptions {
        self.options
    }

    /// Returns the encoded HMAC of `message`.
    pub fn sign(&self, message: &str) -> String {
        let tag = hmac::sign(&self.key, message.as_bytes());
        self.options.encoding.encode(tag.as_ref())
    }

    /// Recomputes the signature of `message` and compares it to `presented` in constant time.
    pub fn matches(&self, message: &str, presented: &str) -> bool {
        let expected = self.sign(message);
        verify_slices_are_equal(expected.as_bytes(), presented.as_bytes()).is_ok()
    }
}

impl Debug for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &self.options.algorithm)
            .field("encoding", &self.options.encoding)
            .finish_non_exhaustive()
    }
}

/// Sign `message` with `secret` using the default options.
pub fn sign(secret: &Secret, message: &str) -> String {
    Signer::new(secret).sign(message)
}
