//! Password hashing with Argon2, plus the legacy unsalted SHA-512 format

use std::fmt;
use std::str::FromStr;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sha2::{Digest, Sha512};
use thiserror::Error;

/// Hex length of a SHA-512 digest.
const SHA512_HEX_LEN: usize = 128;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Unknown password scheme: {0}")]
    UnknownScheme(String),
    #[error("Unrecognized password hash format")]
    UnrecognizedHash,
}

/// Algorithm used for newly stored passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    #[default]
    Argon2,
    /// Unsalted single-pass SHA-512, hex encoded. Kept for existing datasets.
    Sha512,
}

impl PasswordScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordScheme::Argon2 => "argon2",
            PasswordScheme::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasswordScheme {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(PasswordScheme::Argon2),
            "sha512" => Ok(PasswordScheme::Sha512),
            other => Err(PasswordError::UnknownScheme(other.to_string())),
        }
    }
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str, scheme: PasswordScheme) -> Result<String, PasswordError> {
        match scheme {
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|h| h.to_string())
                    .map_err(|e| PasswordError::HashError(e.to_string()))
            }
            PasswordScheme::Sha512 => Ok(Self::sha512_hex(password)),
        }
    }

    /// Verify against a stored hash of either scheme; the format is detected
    /// from the stored value.
    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if hash.starts_with("$argon2") {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|e| PasswordError::HashError(e.to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        if hash.len() == SHA512_HEX_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            let computed = Self::sha512_hex(password);
            return Ok(constant_time_eq(
                computed.as_bytes(),
                hash.to_ascii_lowercase().as_bytes(),
            ));
        }

        Err(PasswordError::UnrecognizedHash)
    }

    /// Lowercase hex of the unsalted SHA-512 digest.
    pub fn sha512_hex(password: &str) -> String {
        hex::encode(Sha512::digest(password.as_bytes()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
