// src/collect/mod.rs
pub mod feed;
pub mod sources;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::classify;
use crate::item::{derive_key, Item};
use crate::normalize::{normalize_timestamp, strip_markup};

/// Per-source fetch timeout. One hung feed must not stall the whole run.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport seam: tests feed canned XML through the collector, the binary
/// uses [`HttpFetcher`].
#[async_trait]
pub trait FeedFetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("daily-briefing/", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetching {url}"))?
            .error_for_status()
            .with_context(|| format!("fetching {url}"))?;
        resp.text().await.with_context(|| format!("reading body of {url}"))
    }
}

/// Fetch every source sequentially and return normalized items, newest
/// first. A source that fails to fetch or parse logs a warning and
/// contributes zero items; it never aborts the run.
pub async fn collect_all<F>(fetcher: &F, urls: &[String]) -> Vec<Item>
where
    F: FeedFetcher + ?Sized,
{
    let mut items: Vec<Item> = Vec::new();

    for url in urls {
        let body = match fetcher.fetch(url).await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = ?e, source = %url, "feed fetch failed, skipping source");
                continue;
            }
        };
        let entries = match feed::parse_feed(&body) {
            Ok(es) => es,
            Err(e) => {
                warn!(error = ?e, source = %url, "feed parse failed, skipping source");
                continue;
            }
        };
        debug!(source = %url, entries = entries.len(), "feed parsed");
        items.extend(entries.into_iter().map(build_item));
    }

    // RFC 3339 strings order chronologically under byte comparison, and ""
    // is minimal, so the reversed comparison puts unknown dates last.
    // `sort_by` is stable: equal timestamps keep their fetch order.
    items.sort_by(|a, b| b.published.cmp(&a.published));
    items
}

fn build_item(entry: feed::RawEntry) -> Item {
    let title = strip_markup(&entry.title);
    let link = entry.link.trim().to_string();
    let summary = strip_markup(&entry.summary);
    let published = normalize_timestamp(&entry.published);
    let tags = classify::classify(&title, &summary);

    Item {
        key: derive_key(&link, &title),
        title,
        link,
        summary,
        published,
        tags,
    }
}
