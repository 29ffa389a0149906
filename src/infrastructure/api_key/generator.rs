//! API key generation
//!
//! Generates collision-resistant key strings of the form
//! `<prefix>-<base36 millis>.<url-safe base64 token>`. The timestamp
//! component exists for human sortability when eyeballing logs; uniqueness
//! is enforced by the store's unique constraint, not here.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::domain::DomainError;

/// Default prefix identifying keys issued by this system
pub const DEFAULT_KEY_PREFIX: &str = "sk-co-vi";

const KEY_BYTES: usize = 32;

/// Generator for secure API keys
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    prefix: String,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

impl KeyGenerator {
    /// Create a generator with a custom prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generate a new API key string
    ///
    /// Draws 32 bytes from the OS randomness source. If that source is
    /// unavailable the call fails; there is no fallback to a weaker RNG.
    pub fn generate(&self) -> Result<String, DomainError> {
        let mut random_bytes = [0u8; KEY_BYTES];

        OsRng
            .try_fill_bytes(&mut random_bytes)
            .map_err(|e| DomainError::generation(format!("OS randomness unavailable: {}", e)))?;

        let token = URL_SAFE_NO_PAD.encode(random_bytes);
        let stamp = base36(Utc::now().timestamp_millis().max(0) as u64);

        Ok(format!("{}-{}.{}", self.prefix, stamp, token))
    }
}

/// Encode a number using the lowercase base-36 alphabet
fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();

    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }

    out.iter().rev().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base36_zero() {
        assert_eq!(base36(0), "0");
    }

    #[test]
    fn test_base36_round_values() {
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(36 * 36), "100");
    }

    #[test]
    fn test_base36_matches_known_value() {
        // 1700000000000 ms == "lq1kp3k0" in base 36
        assert_eq!(base36(1_700_000_000_000), "lq1kp3k0");
    }

    #[test]
    fn test_generated_key_format() {
        let generator = KeyGenerator::default();
        let key = generator.generate().unwrap();

        let rest = key
            .strip_prefix("sk-co-vi-")
            .expect("key must carry the default prefix");
        let (stamp, token) = rest.split_once('.').expect("key must contain a separator");

        assert!(!stamp.is_empty());
        assert!(stamp
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));

        // 32 bytes base64-encoded without padding is 43 characters
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_custom_prefix() {
        let generator = KeyGenerator::new("sk-test");
        let key = generator.generate().unwrap();

        assert!(key.starts_with("sk-test-"));
    }

    #[test]
    fn test_no_duplicates_over_many_generations() {
        let generator = KeyGenerator::default();
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            let key = generator.generate().unwrap();
            assert!(seen.insert(key), "generated a duplicate key");
        }
    }
}
