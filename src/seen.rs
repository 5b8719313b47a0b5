// src/seen.rs
//! Persisted set of already-delivered item keys.
//!
//! Keys live in a plain `Vec` in insertion order (oldest first) so the
//! size bound can drop the oldest entries deterministically; membership
//! checks go through a transient `HashSet`. A missing state file means an
//! empty state. An unreadable or corrupt file is a hard error: silently
//! resetting would re-send the whole backlog, so the operator decides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::item::Item;

/// Upper bound on persisted keys; the most recently appended survive.
pub const SEEN_CAP: usize = 2000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeenState {
    seen: Vec<String>,
}

impl SeenState {
    pub fn load(path: &Path) -> Result<SeenState> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SeenState::default())
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading seen state from {}", path.display()))
            }
        };
        serde_json::from_slice(&bytes)
            .with_context(|| format!("corrupt seen state file {}", path.display()))
    }

    /// Keep only items whose key has not been delivered before, preserving
    /// input order.
    pub fn filter_new(&self, items: Vec<Item>) -> Vec<Item> {
        let seen: HashSet<&str> = self.seen.iter().map(String::as_str).collect();
        items
            .into_iter()
            .filter(|it| !seen.contains(it.key.as_str()))
            .collect()
    }

    /// Append delivered keys, newest last.
    pub fn record(&mut self, items: &[Item]) {
        for it in items {
            self.seen.push(it.key.clone());
        }
    }

    /// Persist, truncated to the most recent [`SEEN_CAP`] keys.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut state = self.clone();
        if state.seen.len() > SEEN_CAP {
            let excess = state.seen.len() - SEEN_CAP;
            state.seen.drain(0..excess);
        }

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating state dir {}", dir.display()))?;
            }
        }
        let json = serde_json::to_string(&state).context("serializing seen state")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing seen state to {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
