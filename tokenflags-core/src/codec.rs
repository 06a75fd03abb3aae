//! Base32 token codec.
//!
//! Bytes are packed most-significant-bit first, byte 0 first, into 5-bit
//! symbols drawn from the RFC 4648 alphabet (`A`-`Z`, `2`-`7`). The alphabet
//! leaves out `0`, `1`, `8` and `9` so that no symbol reads like a letter.
//! Tokens carry no `=` padding; the final symbol is zero-filled on the right.
//!
//! Decoding never fails. Symbols outside the alphabet contribute zero bits,
//! trailing `=` is ignored and lowercase is accepted. Use [`Base32::check`]
//! to find out whether a token was well-formed.

use data_encoding::{BASE32_NOPAD, Encoding, Specification};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{FlagError, Result};

const SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const PADDING: char = '=';

/// Unpadded RFC 4648 base32 that folds lowercase and ignores spare bits.
static LENIENT: Lazy<Encoding> = Lazy::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str(SYMBOLS);
    spec.translate.from.push_str("abcdefghijklmnopqrstuvwxyz");
    spec.translate.to.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    spec.check_trailing_bits = false;
    spec.encoding().unwrap()
});

/// Printable, shareable form of a flag buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// The byte buffer to token codec.
pub struct Base32;

impl Base32 {
    /// Number of symbols in the token of an `len`-byte buffer.
    pub fn token_len(len: usize) -> usize {
        BASE32_NOPAD.encode_len(len)
    }

    /// Number of bytes carried by `symbols` symbols.
    pub fn decoded_len(symbols: usize) -> usize {
        symbols * 5 / 8
    }

    /// Encode `bytes` into a token of [`Base32::token_len`] symbols.
    pub fn encode(bytes: &[u8]) -> Token {
        Token(BASE32_NOPAD.encode(bytes))
    }

    /// Decode a token into as many whole bytes as its symbols carry.
    pub fn decode(token: &str) -> Vec<u8> {
        let symbols = token.trim().trim_end_matches(PADDING);
        let count = symbols.chars().count();
        // Symbols that cannot complete a byte are dropped.
        let keep = Self::token_len(Self::decoded_len(count));

        let cleaned: Vec<u8> = symbols
            .chars()
            .take(keep)
            .map(|c| {
                if c.is_ascii() && SYMBOLS.contains(c.to_ascii_uppercase()) {
                    c as u8
                } else {
                    b'A'
                }
            })
            .collect();

        LENIENT.decode(&cleaned).unwrap_or_default()
    }

    /// Decode `token` into `target`, zero-filling whatever the token does not
    /// cover and dropping decoded bytes that do not fit.
    pub fn decode_into(token: &str, target: &mut [u8]) {
        let decoded = Self::decode(token);
        target.fill(0);
        let n = decoded.len().min(target.len());
        target[..n].copy_from_slice(&decoded[..n]);
    }

    /// Check that `token` is exactly what [`Base32::encode`] would produce
    /// for some `len`-byte buffer.
    pub fn check(token: &str, len: usize) -> Result<()> {
        let symbols = token
            .trim()
            .trim_end_matches(PADDING)
            .to_ascii_uppercase();

        let decoded = BASE32_NOPAD
            .decode(symbols.as_bytes())
            .map_err(|e| FlagError::MalformedToken(e.to_string()))?;

        if decoded.len() != len {
            return Err(FlagError::MalformedToken(format!(
                "expected {} symbols, found {}",
                Self::token_len(len),
                symbols.chars().count()
            )));
        }

        Ok(())
    }
}
