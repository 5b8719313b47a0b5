// src/classify.rs
//! Keyword classifier over an ordered category table.
//!
//! The table lives in `config/categories.json`, embedded at compile time.
//! It is a JSON *array* of `{ "label", "patterns" }` pairs: declaration
//! order is iteration order, and the digest renders sections in the same
//! order. Matching is case-insensitive substring search over the combined
//! title + summary text.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Fallback label for items no pattern matches.
pub const OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub label: String,
    pub patterns: Vec<String>,
}

static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    let raw = include_str!("../config/categories.json");
    let mut cats: Vec<Category> = serde_json::from_str(raw).expect("valid category table");
    for cat in &mut cats {
        for p in &mut cat.patterns {
            *p = condense(p);
        }
    }
    cats
});

/// All category labels in display order, `Other` last.
pub fn category_order() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = CATEGORIES.iter().map(|c| c.label.as_str()).collect();
    out.push(OTHER_LABEL);
    out
}

/// Assign category labels to an item. Multi-label: every category with at
/// least one matching pattern is included, in table order. No match at all
/// falls back to `Other`, so the result is never empty.
pub fn classify(title: &str, summary: &str) -> Vec<String> {
    let haystack = condense(&format!("{} {}", title, summary));

    let mut tags = Vec::new();
    for cat in CATEGORIES.iter() {
        let hit = cat
            .patterns
            .iter()
            .any(|p| !p.is_empty() && haystack.contains(p.as_str()));
        if hit {
            tags.push(cat.label.clone());
        }
    }

    if tags.is_empty() {
        tags.push(OTHER_LABEL.to_string());
    }
    tags
}

// Lowercase + single spaces, so multi-word patterns match across line
// breaks and doubled whitespace.
fn condense(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        let lc = ch.to_ascii_lowercase();
        if lc.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(lc);
            last_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_falls_back_to_other() {
        let tags = classify("Quiet afternoon", "Nothing much going on today.");
        assert_eq!(tags, vec![OTHER_LABEL.to_string()]);
    }

    #[test]
    fn match_is_case_and_whitespace_insensitive() {
        let tags = classify("FDA  issues new\nGUIDANCE", "");
        assert_eq!(tags, vec!["Regulation & Compliance".to_string()]);
    }

    #[test]
    fn multiple_categories_can_match() {
        let tags = classify(
            "Regulator clears retail expansion",
            "The chain adds 40 stores after the compliance review.",
        );
        assert!(tags.contains(&"Regulation & Compliance".to_string()));
        assert!(tags.contains(&"Retail & Channel".to_string()));
    }

    #[test]
    fn tags_follow_table_order_not_match_order() {
        // Summary mentions retail before regulation; table order must win.
        let tags = classify("", "New store openings slowed by the pending regulation.");
        assert_eq!(
            tags,
            vec![
                "Regulation & Compliance".to_string(),
                "Retail & Channel".to_string()
            ]
        );
    }

    #[test]
    fn order_lists_every_label_with_other_last() {
        let order = category_order();
        assert_eq!(order.first().copied(), Some("Regulation & Compliance"));
        assert_eq!(order.last().copied(), Some(OTHER_LABEL));
        assert_eq!(order.len(), 7);
    }
}
