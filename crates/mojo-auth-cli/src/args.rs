use clap::{Parser, Subcommand, ValueEnum};
use mojo_auth::{Algorithm, DAY_IN_SECONDS, Encoding, SignerOptions};

#[derive(Parser, Debug)]
#[command(version, about = "Generate secrets, issue and verify mojo-auth credentials")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// HMAC algorithm; sha256 is not understood by legacy verifiers
    #[clap(
        value_enum,
        global = true,
        long,
        value_name = "ALGORITHM",
        env = "MOJO_AUTH_ALGORITHM",
        default_value_t = AlgorithmArg::Sha1
    )]
    pub algorithm: AlgorithmArg,

    /// Text layout of passwords and generated secrets
    #[clap(
        value_enum,
        global = true,
        long,
        value_name = "ENCODING",
        env = "MOJO_AUTH_ENCODING",
        default_value_t = EncodingArg::Legacy
    )]
    pub encoding: EncodingArg,

    /// Number of seconds to add/subtract from the wall clock time; for testing
    #[clap(
        global = true,
        long,
        value_name = "N",
        env = "MOJO_AUTH_FIXED_OFFSET",
        allow_negative_numbers = true,
        default_value_t = 0
    )]
    pub fixed_offset: i64,

    /// Keep quiet and only log errors
    #[clap(short, long, global = true, conflicts_with = "verbose", default_value_t = false)]
    pub quiet: bool,

    /// Output details; specify multiple times for more detail
    #[clap(
        short = 'v',
        long,
        global = true,
        conflicts_with = "quiet",
        action = clap::ArgAction::Count
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a newly generated random secret
    ///
    /// The default legacy layout ends in a newline that is part of the key; `$(...)` strips
    /// it. Use `--encoding canonical` for a single-line secret.
    Secret,

    /// Issue credentials and print them as JSON
    Issue {
        /// Shared secret used to sign the credentials
        #[clap(long, value_name = "SECRET", env = "MOJO_AUTH_SECRET", hide_env_values = true)]
        secret: String,

        /// Identity asserted by the credentials
        #[clap(short, long, value_name = "ID")]
        identity: Option<String>,

        /// Seconds until the credentials expire; negative values issue expired credentials
        #[clap(
            short,
            long,
            value_name = "SECONDS",
            allow_negative_numbers = true,
            default_value_t = DAY_IN_SECONDS
        )]
        ttl: i64,
    },

    /// Verify credentials; exits with status 1 if they are invalid
    Verify {
        /// Shared secret the credentials were signed with
        #[clap(long, value_name = "SECRET", env = "MOJO_AUTH_SECRET", hide_env_values = true)]
        secret: String,

        #[clap(short, long)]
        username: String,

        #[clap(short, long)]
        password: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum AlgorithmArg {
    Sha1,
    Sha256,
}

#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum EncodingArg {
    Legacy,
    Canonical,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Sha1 => Algorithm::HmacSha1,
            AlgorithmArg::Sha256 => Algorithm::HmacSha256,
        }
    }
}

impl From<EncodingArg> for Encoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Legacy => Encoding::Legacy,
            EncodingArg::Canonical => Encoding::Canonical,
        }
    }
}

impl Args {
    pub fn signer_options(&self) -> SignerOptions {
        SignerOptions {
            algorithm: self.algorithm.into(),
            encoding: self.encoding.into(),
        }
    }
}
