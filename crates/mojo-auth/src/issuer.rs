use jiff::Timestamp;
use tracing::{debug, trace};

use crate::clock::ClockSource;
use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::secret::Secret;
use crate::signer::{Signer, SignerOptions};
use crate::username;

/// Default credential lifetime.
pub const DAY_IN_SECONDS: i64 = 86_400;

/// Creates credentials asserting an identity until a fixed expiry.
#[derive(Debug, Clone)]
pub struct Issuer {
    signer: Signer,
    clock: ClockSource,
}

impl Issuer {
    pub fn new(secret: &Secret) -> Self {
        Self::with_clock(secret, SignerOptions::default(), ClockSource::System)
    }

    pub fn with_clock(secret: &Secret, options: SignerOptions, clock: ClockSource) -> Self {
        Self {
            signer: Signer::with_options(secret, options),
            clock,
        }
    }

    /// Issue credentials for `identity` valid for `ttl` seconds from now.
    ///
    /// A negative `ttl` is allowed and yields credentials that are already expired.
    pub fn issue(&self, identity: Option<&str>, ttl: i64) -> Result<Credentials, AuthError> {
        if let Some(id) = identity
            && !username::is_valid_identity(id)
        {
            return Err(AuthError::InvalidIdentity(id.to_string()));
        }

        let now = self.clock.epoch_seconds();
        let expiry = now
            .checked_add(ttl)
            .ok_or(AuthError::TtlOverflow(now, ttl))?;

        let username = username::encode(expiry, identity);
        let password = self.signer.sign(&username);

        match Timestamp::from_second(expiry) {
            Ok(ts) => debug!("issued credentials for {:?}, expires {}", identity, ts),
            Err(_) => debug!("issued credentials for {:?}, expires {}", identity, expiry),
        }
        trace!("username {:?}", username);

        Ok(Credentials { username, password })
    }

    /// Issue credentials valid for [`DAY_IN_SECONDS`].
    pub fn issue_default(&self, identity: Option<&str>) -> Result<Credentials, AuthError> {
        self.issue(identity, DAY_IN_SECONDS)
    }
}
