// src/collect/sources.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a feed source list: one URL per line, blank lines and
/// `#`-prefixed comment lines skipped, surrounding whitespace trimmed.
pub fn parse_source_list(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_sources(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading feed sources from {}", path.display()))?;
    Ok(parse_source_list(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blanks_are_skipped() {
        let list = "# comment\n\nhttps://example.com/feed\n";
        assert_eq!(
            parse_source_list(list),
            vec!["https://example.com/feed".to_string()]
        );
    }

    #[test]
    fn urls_are_trimmed_and_order_preserved() {
        let list = "  https://a.example/rss  \n#skip\nhttps://b.example/atom";
        assert_eq!(
            parse_source_list(list),
            vec![
                "https://a.example/rss".to_string(),
                "https://b.example/atom".to_string()
            ]
        );
    }
}
