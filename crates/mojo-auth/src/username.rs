//! Packing of the expiry timestamp and identity into the username.
//!
//! The username is the signed message. Its wire format is
//! `"<decimal unix timestamp>:<identity or empty>"`.

/// Separates the expiry timestamp from the identity.
pub const DELIMITER: char = ':';

/// The two components carried by a username.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Decoded<'a> {
    /// Seconds since the Unix epoch. `None` when the expiry segment is missing or malformed.
    pub expiry: Option<i64>,
    pub identity: Option<&'a str>,
}

/// Render a username. An absent or empty identity still keeps the delimiter: `"<expiry>:"`.
pub fn encode(expiry: i64, identity: Option<&str>) -> String {
    format!("{expiry}{DELIMITER}{}", identity.unwrap_or_default())
}

/// Split a username on its first delimiter.
///
/// Never fails. An expiry segment that is not a decimal integer decodes as `None`, which a
/// verifier must treat as expired.
pub fn decode(username: &str) -> Decoded<'_> {
    let (expiry, identity) = match username.split_once(DELIMITER) {
        Some((expiry, identity)) => (expiry, Some(identity)),
        None => (username, None),
    };

    Decoded {
        expiry: expiry.parse().ok(),
        identity: identity.filter(|id| !id.is_empty()),
    }
}

/// Identities containing the delimiter cannot be decoded unambiguously by every verifier.
pub fn is_valid_identity(identity: &str) -> bool {
    !identity.contains(DELIMITER)
}
