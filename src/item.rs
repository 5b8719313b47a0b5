// src/item.rs
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex length of a dedup key (12 digest bytes).
const KEY_LEN: usize = 24;

/// One normalized feed entry, ready for dedup, classification and rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Stable dedup key derived from `link` and `title`.
    pub key: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    /// RFC 3339 UTC timestamp, or "" when the source date was missing or
    /// unparseable. Empty sorts last.
    pub published: String,
    /// Category labels in table order; never empty ("Other" fallback).
    pub tags: Vec<String>,
}

/// Derive the dedup key: sha256 over `link`, a fixed separator, and `title`,
/// truncated to 24 hex chars. The seen-state file stores these keys, so the
/// output must stay byte-for-byte identical across runs and platforms.
pub fn derive_key(link: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(link.as_bytes());
    hasher.update(b"|");
    hasher.update(title.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(KEY_LEN);
    for b in digest.iter().take(KEY_LEN / 2) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic() {
        let a = derive_key("https://example.com/a", "Hello");
        let b = derive_key("https://example.com/a", "Hello");
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn key_depends_on_both_inputs() {
        let base = derive_key("https://example.com/a", "Hello");
        assert_ne!(base, derive_key("https://example.com/b", "Hello"));
        assert_ne!(base, derive_key("https://example.com/a", "Hullo"));
    }

    #[test]
    fn key_is_stable_across_releases() {
        // Pinned value: changing it would orphan every persisted seen key.
        assert_eq!(
            derive_key("https://example.com/a", "Hello"),
            "391e7f9fcd0e5a84943c435e"
        );
    }
}
