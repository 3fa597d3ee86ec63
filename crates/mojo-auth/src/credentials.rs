use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

/// The pair exchanged between issuer and verifier.
///
/// `username` is the signed, non-secret message; `password` is its encoded HMAC.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of verifying a credential pair.
///
/// `Rejected` carries no reason: malformed, expired and forged credentials are
/// indistinguishable to the caller.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Verification {
    Rejected,
    AcceptedAnonymous,
    AcceptedWithIdentity(String),
}

impl Verification {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Verification::Rejected)
    }

    /// The asserted identity, when the credentials are valid and carry one.
    pub fn identity(&self) -> Option<&str> {
        match self {
            Verification::AcceptedWithIdentity(id) => Some(id),
            _ => None,
        }
    }
}
