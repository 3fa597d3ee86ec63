//! Stateless cross-application credentials based on HMAC.
//!
//! An issuing application and a verifying application share a secret out-of-band. The issuer
//! produces a `username` of the form `"<expiry>:<identity>"` and a `password` which is the HMAC
//! of that username. The verifier recomputes the HMAC and checks the expiry; no database,
//! session or network round-trip is involved.
//!
//! ```no_run
//! use mojo_auth::{CredentialRequest, Secret, Verification, create_credentials, test_credentials};
//!
//! let secret = Secret::try_from("topsecret")?;
//! let request = CredentialRequest::new(secret.clone()).identity("svc-a").ttl(3600);
//! let credentials = create_credentials(&request)?;
//!
//! assert_eq!(
//!     test_credentials(&credentials, &secret),
//!     Verification::AcceptedWithIdentity("svc-a".to_string())
//! );
//! # Ok::<(), mojo_auth::AuthError>(())
//! ```

#![forbid(unsafe_code)]

pub mod clock;
pub mod credentials;
pub mod encoding;
pub mod error;
pub mod issuer;
pub mod secret;
pub mod signer;
pub mod username;
pub mod verifier;

pub use clock::ClockSource;
pub use credentials::{Credentials, Verification};
pub use encoding::Encoding;
pub use error::AuthError;
pub use issuer::{DAY_IN_SECONDS, Issuer};
pub use secret::{Secret, create_secret};
pub use signer::{Algorithm, Signer, SignerOptions};
pub use verifier::Verifier;

/// Parameters for [`create_credentials`]. Only the secret is required.
#[derive(Debug, Clone)]
pub struct CredentialRequest {
    pub identity: Option<String>,
    pub secret: Secret,
    pub ttl: i64,
}

impl CredentialRequest {
    pub fn new(secret: Secret) -> Self {
        Self {
            identity: None,
            secret,
            ttl: DAY_IN_SECONDS,
        }
    }

    pub fn identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Create credentials against the system clock with the default (legacy-compatible) options.
pub fn create_credentials(request: &CredentialRequest) -> Result<Credentials, AuthError> {
    Issuer::new(&request.secret).issue(request.identity.as_deref(), request.ttl)
}

/// Test credentials against the system clock with the default (legacy-compatible) options.
pub fn test_credentials(credentials: &Credentials, secret: &Secret) -> Verification {
    Verifier::new(secret).verify(credentials)
}
