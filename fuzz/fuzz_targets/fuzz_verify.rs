#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mojo_auth::{ClockSource, Credentials, Secret, SignerOptions, Verification, Verifier};

const NOW: i64 = 1_700_000_000;

#[derive(Arbitrary, Debug)]
struct FuzzCredentials {
    username: String,
    password: String,
}

fuzz_target!(|input: FuzzCredentials| {
    let secret = Secret::try_from("fuzzing-secret").unwrap();
    let verifier = Verifier::with_clock(
        &secret,
        SignerOptions::default(),
        ClockSource::new_mock(NOW),
    );

    let credentials = Credentials::new(input.username, input.password);

    // Forging a signature by chance is not expected; any acceptance is a bug
    assert_eq!(verifier.verify(&credentials), Verification::Rejected);
});
