use tracing::debug;

use crate::clock::ClockSource;
use crate::credentials::{Credentials, Verification};
use crate::secret::Secret;
use crate::signer::{Signer, SignerOptions};
use crate::username;

/// Checks credentials produced by an [`Issuer`](crate::Issuer) holding the same secret.
///
/// Verification is a pure function of the credentials, the secret and the clock; nothing is
/// remembered between calls.
#[derive(Debug, Clone)]
pub struct Verifier {
    signer: Signer,
    clock: ClockSource,
}

impl Verifier {
    pub fn new(secret: &Secret) -> Self {
        Self::with_clock(secret, SignerOptions::default(), ClockSource::System)
    }

    pub fn with_clock(secret: &Secret, options: SignerOptions, clock: ClockSource) -> Self {
        Self {
            signer: Signer::with_options(secret, options),
            clock,
        }
    }

    /// Verify `credentials`.
    ///
    /// Checks, in order:
    /// 1. The expiry decoded from the username is present and not in the past.
    /// 2. The password equals the recomputed signature (constant-time comparison).
    ///
    /// The expiry check runs first and unconditionally, so correctly signed but expired
    /// credentials are rejected.
    pub fn verify(&self, credentials: &Credentials) -> Verification {
        let decoded = username::decode(&credentials.username);
        let now = self.clock.epoch_seconds();

        let Some(expiry) = decoded.expiry else {
            debug!("rejecting credentials: expiry cannot be decoded");
            return Verification::Rejected;
        };

        if expiry < now {
            debug!("rejecting credentials: expiry {expiry} is before now {now}");
            return Verification::Rejected;
        }

        if !self
            .signer
            .matches(&credentials.username, &credentials.password)
        {
            debug!("rejecting credentials: signature mismatch");
            return Verification::Rejected;
        }

        match decoded.identity {
            Some(id) => Verification::AcceptedWithIdentity(id.to_string()),
            None => Verification::AcceptedAnonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::issuer::Issuer;
    use crate::signer::Algorithm;

    const NOW: i64 = 1_700_000_000;

    fn secret(value: &str) -> Secret {
        Secret::try_from(value).unwrap()
    }

    fn pair(clock: &ClockSource, secret_value: &str) -> (Issuer, Verifier) {
        let secret = secret(secret_value);
        let options = SignerOptions::default();
        (
            Issuer::with_clock(&secret, options, clock.clone()),
            Verifier::with_clock(&secret, options, clock.clone()),
        )
    }

    #[test]
    fn accepts_fresh_credentials_with_identity() {
        let clock = ClockSource::new_mock(NOW);
        let (issuer, verifier) = pair(&clock, "topsecret");

        let credentials = issuer.issue(Some("svc-a"), 3600).unwrap();
        assert_eq!(
            verifier.verify(&credentials),
            Verification::AcceptedWithIdentity("svc-a".to_string())
        );
    }

    #[test]
    fn accepts_fresh_anonymous_credentials() {
        let clock = ClockSource::new_mock(NOW);
        let (issuer, verifier) = pair(&clock, "topsecret");

        let credentials = issuer.issue(None, 3600).unwrap();
        assert_eq!(
            verifier.verify(&credentials),
            Verification::AcceptedAnonymous
        );

        let credentials = issuer.issue(Some(""), 3600).unwrap();
        assert_eq!(
            verifier.verify(&credentials),
            Verification::AcceptedAnonymous
        );
    }

    #[test]
    fn expiry_boundary() {
        let mut clock = ClockSource::new_mock(NOW);
        let (issuer, verifier) = pair(&clock, "topsecret");
        let credentials = issuer.issue(Some("svc-a"), 3600).unwrap();

        clock.advance(Duration::from_secs(10));
        assert!(verifier.verify(&credentials).is_accepted());

        // still valid at the exact expiry second
        clock.set_time(NOW + 3600);
        assert!(verifier.verify(&credentials).is_accepted());

        clock.set_time(NOW + 3601);
        assert_eq!(verifier.verify(&credentials), Verification::Rejected);
    }

    #[test]
    fn already_expired_credentials_are_rejected() {
        let clock = ClockSource::new_mock(NOW);
        let (issuer, verifier) = pair(&clock, "topsecret");

        let credentials = issuer.issue(Some("svc-a"), -1).unwrap();
        assert_eq!(verifier.verify(&credentials), Verification::Rejected);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let clock = ClockSource::new_mock(NOW);
        let (issuer, _) = pair(&clock, "secret-a");
        let (_, verifier) = pair(&clock, "secret-b");

        let credentials = issuer.issue(Some("svc-a"), 3600).unwrap();
        assert_eq!(verifier.verify(&credentials), Verification::Rejected);
    }

    #[test]
    fn mismatched_algorithm_is_rejected() {
        let clock = ClockSource::new_mock(NOW);
        let secret = secret("topsecret");
        let issuer = Issuer::with_clock(&secret, SignerOptions::default(), clock.clone());
        let options = SignerOptions {
            algorithm: Algorithm::HmacSha256,
            ..SignerOptions::default()
        };
        let verifier = Verifier::with_clock(&secret, options, clock);

        let credentials = issuer.issue(Some("svc-a"), 3600).unwrap();
        assert_eq!(verifier.verify(&credentials), Verification::Rejected);
    }

    #[test]
    fn malformed_username_is_rejected() {
        let clock = ClockSource::new_mock(NOW);
        let (_, verifier) = pair(&clock, "topsecret");
        let signer = Signer::new(&secret("topsecret"));

        // correctly signed, but the expiry cannot be decoded
        for username in ["", ":svc-a", "soon:svc-a", "svc-a"] {
            let credentials = Credentials::new(username, signer.sign(username));
            assert_eq!(
                verifier.verify(&credentials),
                Verification::Rejected,
                "username {username:?}"
            );
        }
    }

    #[test]
    fn malformed_expiry_is_rejected_before_epoch() {
        // a clock below zero must not let an undecodable expiry through
        let clock = ClockSource::new_mock(-100);
        let (_, verifier) = pair(&clock, "topsecret");
        let signer = Signer::new(&secret("topsecret"));

        for username in ["soon:svc-a", ":svc-a", "svc-a", ""] {
            let credentials = Credentials::new(username, signer.sign(username));
            assert_eq!(
                verifier.verify(&credentials),
                Verification::Rejected,
                "username {username:?}"
            );
        }

        // a well-formed expiry is still honoured on such a clock
        let username = "-50:svc-a";
        let credentials = Credentials::new(username, signer.sign(username));
        assert_eq!(
            verifier.verify(&credentials),
            Verification::AcceptedWithIdentity("svc-a".to_string())
        );
    }

    #[test]
    fn forged_future_expiry_is_rejected() {
        let clock = ClockSource::new_mock(NOW);
        let (issuer, verifier) = pair(&clock, "topsecret");

        let mut credentials = issuer.issue(Some("svc-a"), 60).unwrap();
        credentials.username = username::encode(NOW + 1_000_000, Some("svc-a"));
        assert_eq!(verifier.verify(&credentials), Verification::Rejected);
    }

    #[test]
    fn identity_with_delimiter_from_foreign_issuer() {
        // A foreign issuer that does not forbid ':' in identities; the remainder after the
        // first delimiter is the identity.
        let clock = ClockSource::new_mock(NOW);
        let (_, verifier) = pair(&clock, "topsecret");
        let username = format!("{}:svc:a", NOW + 60);
        let password = Signer::new(&secret("topsecret")).sign(&username);

        assert_eq!(
            verifier.verify(&Credentials::new(username, password)),
            Verification::AcceptedWithIdentity("svc:a".to_string())
        );
    }

    #[test]
    fn verifier_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Verifier>();
        assert_send_sync::<Issuer>();
    }
}
