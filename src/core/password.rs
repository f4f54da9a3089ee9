//! bcrypt password hashing.
//!
//! Hashes are salted per call, so hashing the same password twice gives two
//! different strings. Compare them with [`PasswordHasher::verify`], never with
//! `==`: `PasswordHash` deliberately has no `PartialEq`.

use crate::utils::error::{InterlinkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Work factor the user and payment services have always stored hashes with.
pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt only looks at the first 72 bytes; longer input is refused rather
/// than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

const ENCODED_LEN: usize = 60;
const SALT_AND_HASH_LEN: usize = 53;

#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Accepts a stored `$2a$`/`$2b$`/`$2x$`/`$2y$` modular-crypt string.
    pub fn parse(encoded: impl Into<String>) -> Result<Self> {
        let encoded = encoded.into();
        parse_cost(&encoded)?;
        Ok(Self(encoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn cost(&self) -> u32 {
        // Validated on construction.
        parse_cost(&self.0).unwrap_or(DEFAULT_COST)
    }
}

fn parse_cost(encoded: &str) -> Result<u32> {
    let invalid = |reason: &str| InterlinkError::InvalidPasswordHash {
        reason: reason.to_string(),
    };

    if encoded.len() != ENCODED_LEN {
        return Err(invalid("expected 60 characters"));
    }

    let mut parts = encoded.split('$');
    if parts.next() != Some("") {
        return Err(invalid("missing leading '$'"));
    }

    match parts.next() {
        Some("2a" | "2b" | "2x" | "2y") => {}
        _ => return Err(invalid("unknown bcrypt version")),
    }

    let cost = parts
        .next()
        .filter(|c| c.len() == 2)
        .and_then(|c| c.parse::<u32>().ok())
        .filter(|c| (MIN_COST..=MAX_COST).contains(c))
        .ok_or_else(|| invalid("cost must be two digits between 04 and 31"))?;

    match parts.next() {
        Some(rest) if rest.len() == SALT_AND_HASH_LEN && parts.next().is_none() => Ok(cost),
        _ => Err(invalid("salt and hash section is malformed")),
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordHash(cost={}, ..)", self.cost())
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PasswordHash {
    type Error = InterlinkError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<PasswordHash> for String {
    fn from(hash: PasswordHash) -> Self {
        hash.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cost(cost: u32) -> Result<Self> {
        crate::utils::validation::validate_range("password.cost", cost, MIN_COST, MAX_COST)?;
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, plaintext: &str) -> Result<PasswordHash> {
        check_length(plaintext)?;
        let encoded = bcrypt::hash(plaintext, self.cost)?;
        PasswordHash::parse(encoded)
    }

    /// Constant-time check of `plaintext` against a stored hash, using the
    /// salt and cost embedded in it.
    pub fn verify(&self, plaintext: &str, stored: &PasswordHash) -> Result<bool> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            // Could never have been produced by `hash`.
            return Ok(false);
        }
        Ok(bcrypt::verify(plaintext, stored.as_str())?)
    }

    /// Like [`verify`](Self::verify) but a mismatch is an error.
    pub fn check(&self, plaintext: &str, stored: &PasswordHash) -> Result<()> {
        if self.verify(plaintext, stored)? {
            Ok(())
        } else {
            Err(InterlinkError::PasswordMismatch)
        }
    }

    /// True when `stored` was hashed with a different cost than this hasher uses.
    pub fn needs_rehash(&self, stored: &PasswordHash) -> bool {
        stored.cost() != self.cost
    }
}

fn check_length(plaintext: &str) -> Result<()> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(InterlinkError::PasswordTooLong {
            length: plaintext.len(),
            max: MAX_PASSWORD_BYTES,
        });
    }
    Ok(())
}
