use thiserror::Error;

/// Failures that surface to the caller as hard errors.
///
/// A credential that fails verification is not an error; see
/// [`Verification::Rejected`](crate::Verification::Rejected).
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("secret must not be empty")]
    EmptySecret,

    #[error("identity must not contain the ':' delimiter: {0:?}")]
    InvalidIdentity(String),

    #[error("expiry overflows: now {0} + ttl {1}")]
    TtlOverflow(i64, i64),
}
