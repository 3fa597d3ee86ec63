//! The mojo_auth command line tool

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use jiff::Timestamp;
use mojo_auth::{
    ClockSource, Credentials, Issuer, Secret, SignerOptions, Verification, Verifier, username,
};
use mojo_auth_cli::args::{Args, Command};
use tracing::{debug, error, info};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Auth(#[from] mojo_auth::AuthError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();

    enable_logging(&args);
    debug!("command: {:?}", args.command);

    let options = args.signer_options();
    let clock = clock_from_offset(args.fixed_offset);
    let mut stdout = std::io::stdout().lock();

    let result = match &args.command {
        Command::Secret => handle_secret(&args, &mut stdout),
        Command::Issue {
            secret,
            identity,
            ttl,
        } => handle_issue(
            secret,
            identity.as_deref(),
            *ttl,
            options,
            clock,
            &mut stdout,
        ),
        Command::Verify {
            secret,
            username,
            password,
        } => handle_verify(secret, username, password, options, clock, &mut stdout),
    };

    result.unwrap_or_else(|e| {
        error!("{e}");
        ExitCode::FAILURE
    })
}

fn clock_from_offset(offset: i64) -> ClockSource {
    if offset == 0 {
        ClockSource::System
    } else {
        info!("clock offset of {offset} seconds in effect");
        ClockSource::FixedOffset(offset)
    }
}

fn handle_secret(args: &Args, out: &mut impl Write) -> Result<ExitCode, CliError> {
    let secret = mojo_auth::secret::create_secret_with(args.encoding.into());

    // the legacy layout already ends in a newline, and that newline is part of the key
    out.write_all(secret.as_bytes())?;
    if !secret.ends_with('\n') {
        writeln!(out)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn handle_issue(
    secret: &str,
    identity: Option<&str>,
    ttl: i64,
    options: SignerOptions,
    clock: ClockSource,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let secret = Secret::try_from(secret)?;
    let issuer = Issuer::with_clock(&secret, options, clock);
    let credentials = issuer.issue(identity, ttl)?;

    if let Some(expiry) = username::decode(&credentials.username).expiry {
        match Timestamp::from_second(expiry) {
            Ok(ts) => info!("credentials expire at {ts}"),
            Err(_) => info!("credentials expire at {expiry}"),
        }
    }

    writeln!(out, "{}", serde_json::to_string_pretty(&credentials)?)?;
    Ok(ExitCode::SUCCESS)
}

fn handle_verify(
    secret: &str,
    username: &str,
    password: &str,
    options: SignerOptions,
    clock: ClockSource,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let secret = Secret::try_from(secret)?;
    let verifier = Verifier::with_clock(&secret, options, clock);
    let credentials = Credentials::new(username, unescape_newlines(password));

    let code = match verifier.verify(&credentials) {
        Verification::AcceptedWithIdentity(id) => {
            writeln!(out, "valid: {id}")?;
            ExitCode::SUCCESS
        }
        Verification::AcceptedAnonymous => {
            writeln!(out, "valid")?;
            ExitCode::SUCCESS
        }
        Verification::Rejected => {
            writeln!(out, "invalid")?;
            ExitCode::FAILURE
        }
    };

    Ok(code)
}

/// Legacy passwords end in a newline, which is awkward to pass on a command line. Accept the
/// JSON-style `\n` escape printed by `issue` as well as a literal newline.
fn unescape_newlines(password: &str) -> String {
    password.replace("\\n", "\n")
}

fn enable_logging(args: &Args) {
    let mut builder = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr);

    if args.quiet {
        builder = builder.with_max_level(tracing::Level::ERROR);
    } else {
        match args.verbose {
            2.. => builder = builder.with_max_level(tracing::Level::TRACE),
            1 => builder = builder.with_max_level(tracing::Level::DEBUG),
            _ => builder = builder.with_max_level(tracing::Level::INFO),
        }
    }

    builder.init();
}
