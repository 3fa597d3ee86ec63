#![no_main]

use libfuzzer_sys::fuzz_target;
use mojo_auth::username::{self, DELIMITER};

fuzz_target!(|data: &str| {
    let decoded = username::decode(data);

    if let Some(identity) = decoded.identity {
        assert!(!identity.is_empty());
        assert!(data.ends_with(identity));
    }

    // anything an issuer accepts must decode to exactly what was encoded
    if let (Some(expiry), Some(identity)) = (
        decoded.expiry,
        decoded.identity.filter(|id| username::is_valid_identity(id)),
    ) {
        let reencoded = username::encode(expiry, Some(identity));
        let again = username::decode(&reencoded);
        assert_eq!(again.expiry, Some(expiry));
        assert_eq!(again.identity, Some(identity));
        assert!(!identity.contains(DELIMITER));
    }
});
