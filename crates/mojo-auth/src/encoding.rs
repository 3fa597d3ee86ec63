//! Base64 layouts used for passwords and generated secrets

use std::fmt::{Display, Formatter};

use data_encoding::{BASE64, BASE64_NOPAD};

/// Line length of the legacy (RFC 2045 style) layout, in output characters.
pub const LEGACY_LINE_LEN: usize = 60;

/// How raw digest bytes are rendered as text.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Encoding {
    /// Padded standard base64, a `\n` after every 60 characters and a trailing `\n`.
    ///
    /// Byte-for-byte identical to what deployed verifiers of this scheme emit and expect.
    #[default]
    Legacy,

    /// Unpadded standard base64 on a single line. Not interoperable with `Legacy` verifiers.
    Canonical,
}

impl Encoding {
    pub fn encode(&self, data: &[u8]) -> String {
        match self {
            Encoding::Legacy => wrap_lines(&BASE64.encode(data)),
            Encoding::Canonical => BASE64_NOPAD.encode(data),
        }
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Legacy => write!(f, "legacy"),
            Encoding::Canonical => write!(f, "canonical"),
        }
    }
}

fn wrap_lines(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len() + encoded.len() / LEGACY_LINE_LEN + 1);

    // base64 output is pure ASCII, so byte chunks are always valid str boundaries
    for line in encoded.as_bytes().chunks(LEGACY_LINE_LEN) {
        out.extend(line.iter().map(|&b| b as char));
        out.push('\n');
    }

    out
}
