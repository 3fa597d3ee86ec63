use std::fmt::{Debug, Formatter};

use aws_lc_rs::digest::{SHA512, digest};
use zeroize::ZeroizeOnDrop;

use crate::encoding::Encoding;
use crate::error::AuthError;

/// Number of bytes drawn from the system CSPRNG when generating a new secret.
const ENTROPY_LEN: usize = 512;

/// Key material shared out-of-band between the issuing and verifying applications.
///
/// The bytes are used verbatim as the HMAC key. A generated secret's text form (including any
/// line breaks of the legacy layout) *is* the key, so it must be handed around unmodified.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Secret {
    value: Vec<u8>,
}

#[allow(clippy::len_without_is_empty)]
impl Secret {
    pub fn new(value: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        Ok(Self {
            value: Vec::from(value),
        })
    }

    /// Generate a new random secret rendered with the given `encoding`.
    pub fn generate(encoding: Encoding) -> Self {
        Self {
            value: create_secret_with(encoding).into_bytes(),
        }
    }

    pub fn expose(&self) -> &[u8] {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(len={})", self.len())
    }
}

impl TryFrom<&str> for Secret {
    type Error = AuthError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Secret::new(value)
    }
}

impl TryFrom<String> for Secret {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Secret::new(value)
    }
}

/// Create a new random secret in the legacy layout: SHA-512 over 512 bytes of system entropy,
/// base64 encoded with line breaks.
pub fn create_secret() -> String {
    create_secret_with(Encoding::Legacy)
}

/// Like [`create_secret`], with a caller-chosen text layout.
pub fn create_secret_with(encoding: Encoding) -> String {
    let mut entropy = [0u8; ENTROPY_LEN];
    aws_lc_rs::rand::fill(&mut entropy).expect("should be infallible");

    let hashed = digest(&SHA512, &entropy);
    zeroize::Zeroize::zeroize(&mut entropy);

    encoding.encode(hashed.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(Secret::new(b""), Err(AuthError::EmptySecret)));
        assert!(matches!(Secret::try_from(""), Err(AuthError::EmptySecret)));
    }

    #[test]
    fn bytes_are_kept_verbatim() {
        let secret = Secret::try_from("topsecret\n").unwrap();
        assert_eq!(secret.expose(), b"topsecret\n");
        assert_eq!(secret.len(), 10);
    }

    #[test]
    fn debug_does_not_leak_value() {
        let secret = Secret::try_from(String::from("hunter2")).unwrap();
        let debug = format!("{secret:?}");
        assert_eq!(debug, "Secret(len=7)");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn created_secret_has_legacy_layout() {
        // 64 byte digest -> 88 characters over two lines
        let secret = create_secret();
        assert_eq!(secret.len(), 88 + 2);
        assert!(secret.ends_with("==\n"));
        assert_eq!(secret.matches('\n').count(), 2);
    }

    #[test]
    fn created_secrets_differ() {
        assert_ne!(create_secret(), create_secret());
    }

    #[test]
    fn generated_canonical_secret() {
        let secret = Secret::generate(Encoding::Canonical);
        // 64 bytes unpadded -> 86 characters
        assert_eq!(secret.len(), 86);
        assert!(!secret.expose().contains(&b'\n'));
    }
}
