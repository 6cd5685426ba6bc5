//! Hash-based record identifiers.
//!
//! Ids look like `{prefix}-{hash}` (e.g. `acme-k3v9`), where the hash is the
//! base36 form of a SHA256 digest over the record's seed text, the entity
//! kind, the creation time and a retry nonce. The hash grows from 4 to 6
//! characters as the collection grows.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::EntityKind;

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_NONCE: u32 = 100;
const MAX_HASH_LENGTH: usize = 6;

/// Errors from id generation.
#[derive(Debug, Error)]
pub enum IdGenerationError {
    /// Every nonce at every length collided.
    #[error("Unable to generate unique ID after {attempts} attempts")]
    CollisionExhausted {
        /// Attempts made per length.
        attempts: u32,
    },
}

/// Generates collision-free ids for one entity collection.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    kind: EntityKind,
    existing_ids: HashSet<String>,
}

impl IdGenerator {
    /// A generator for `kind` records with the workspace id prefix.
    pub fn new(prefix: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            prefix: prefix.into(),
            kind,
            existing_ids: HashSet::new(),
        }
    }

    /// Mark an id as taken (used when loading a snapshot).
    pub fn register_id(&mut self, id: impl Into<String>) {
        self.existing_ids.insert(id.into());
    }

    /// Release an id after its record was deleted.
    pub fn forget_id(&mut self, id: &str) {
        self.existing_ids.remove(id);
    }

    /// Number of ids currently taken.
    pub fn len(&self) -> usize {
        self.existing_ids.len()
    }

    /// Whether no ids are taken.
    pub fn is_empty(&self) -> bool {
        self.existing_ids.is_empty()
    }

    /// Generate and reserve a new id derived from `seed` (usually the name).
    ///
    /// # Errors
    ///
    /// Returns [`IdGenerationError::CollisionExhausted`] if no free id could
    /// be found even at the maximum length.
    pub fn generate(&mut self, seed: &str) -> Result<String, IdGenerationError> {
        let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();

        for length in adaptive_length(self.existing_ids.len())..=MAX_HASH_LENGTH {
            for nonce in 0..MAX_NONCE {
                let id = self.hash_id(seed, timestamp, nonce, length);
                if self.existing_ids.insert(id.clone()) {
                    if nonce > 0 {
                        debug!(nonce, length, "Generated unique ID after collision retries");
                    }
                    return Ok(id);
                }
            }
            warn!(
                length,
                max_nonce = MAX_NONCE,
                "All nonces exhausted, increasing ID length"
            );
        }

        Err(IdGenerationError::CollisionExhausted {
            attempts: MAX_NONCE,
        })
    }

    fn hash_id(&self, seed: &str, timestamp: i64, nonce: u32, length: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}|{}|{}|{}", self.kind, seed, timestamp, nonce).as_bytes());
        let digest = hasher.finalize();
        format!("{}-{}", self.prefix, encode_base36(&digest[..8], length))
    }
}

/// Hash length for a collection of `size` records.
///
/// - up to 500: 4 chars
/// - up to 1,500: 5 chars
/// - beyond: 6 chars
fn adaptive_length(size: usize) -> usize {
    match size {
        0..=500 => 4,
        501..=1500 => 5,
        _ => MAX_HASH_LENGTH,
    }
}

/// Base36 of the first 8 digest bytes, left-truncated to `length` digits.
fn encode_base36(bytes: &[u8], length: usize) -> String {
    let mut n = bytes
        .iter()
        .fold(0u64, |acc, &byte| acc.wrapping_shl(8) | u64::from(byte));

    let mut digits = Vec::with_capacity(length);
    while digits.len() < length {
        #[allow(clippy::cast_possible_truncation)]
        let digit = (n % 36) as usize;
        digits.push(char::from(BASE36_CHARS[digit]));
        n /= 36;
    }
    digits.iter().rev().collect()
}

/// Whether `id` has the `{prefix}-{hash}` shape with a 4-6 char base36 hash.
pub fn validate_id(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hash| {
            (4..=MAX_HASH_LENGTH).contains(&hash.len())
                && hash
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        })
}
