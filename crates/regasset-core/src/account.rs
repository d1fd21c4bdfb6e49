//! # Account Keys
//!
//! `AccountId` is the validated form of an issuer's public account key as it
//! appears in directory documents and ledger queries: a 56-character base32
//! string encoding a version byte, a 32-byte ed25519 public key and a
//! CRC16-XModem checksum.
//!
//! Only the textual encoding is validated here. Whether the account exists on
//! the ledger is a question for the flags lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of an encoded account key.
pub const ENCODED_LEN: usize = 56;

/// Version byte for ed25519 public keys (renders as a leading `G`).
const VERSION_ACCOUNT_ID: u8 = 6 << 3;

/// Decoded payload: version byte + 32-byte key + 2-byte checksum.
const DECODED_LEN: usize = 35;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Why a string is not a valid account key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    /// Wrong number of characters.
    #[error("account key must be {ENCODED_LEN} characters, got {0}")]
    Length(usize),

    /// A character outside the base32 alphabet.
    #[error("invalid base32 character {0:?} in account key")]
    Alphabet(char),

    /// Decodes, but is not a public account key (e.g. a secret seed).
    #[error("unexpected version byte 0x{0:02x} in account key")]
    Version(u8),

    /// Checksum does not match the payload.
    #[error("account key checksum mismatch")]
    Checksum,
}

/// A syntactically valid public account key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Validate and wrap an encoded account key.
    pub fn parse(encoded: &str) -> Result<Self, AccountIdError> {
        let raw = decode_base32(encoded)?;
        if raw[0] != VERSION_ACCOUNT_ID {
            return Err(AccountIdError::Version(raw[0]));
        }
        let expected = crc16_xmodem(&raw[..DECODED_LEN - 2]);
        let actual = u16::from_le_bytes([raw[DECODED_LEN - 2], raw[DECODED_LEN - 1]]);
        if expected != actual {
            return Err(AccountIdError::Checksum);
        }
        Ok(Self(encoded.to_string()))
    }

    /// The encoded key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn decode_base32(encoded: &str) -> Result<[u8; DECODED_LEN], AccountIdError> {
    let chars = encoded.chars().count();
    if chars != ENCODED_LEN {
        return Err(AccountIdError::Length(chars));
    }

    let mut out = [0u8; DECODED_LEN];
    let mut buffer: u32 = 0;
    let mut bits = 0u32;
    let mut pos = 0usize;
    for c in encoded.chars() {
        let value = ALPHABET
            .iter()
            .position(|&a| a as char == c)
            .ok_or(AccountIdError::Alphabet(c))? as u32;
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out[pos] = (buffer >> bits) as u8;
            pos += 1;
            buffer &= (1 << bits) - 1;
        }
    }
    Ok(out)
}

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
