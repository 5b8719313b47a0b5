// src/collect/feed.rs
//! Wire-format parsing for RSS 2.0 and Atom via quick-xml's serde layer.
//! Both formats reduce to [`RawEntry`]; field preferences (summary over
//! content, published over updated) are applied here so the collector
//! only sees one shape.

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str;
use quick_xml::events::Event;
use serde::Deserialize;

/// One feed entry as it came off the wire, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
    /// Raw timestamp text exactly as the feed carried it.
    pub published: String,
}

// --- RSS 2.0 ---

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

// --- Atom ---

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<AtomText>,
    content: Option<AtomText>,
    published: Option<String>,
    updated: Option<String>,
}

// Atom text constructs carry a `type` attribute, so the payload has to be
// pulled out of `$text` rather than deserialized as a bare String.
#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Parse a feed document. The root element picks the wire format:
/// `<rss>` is RSS 2.0, `<feed>` is Atom, anything else is an error.
pub fn parse_feed(xml: &str) -> Result<Vec<RawEntry>> {
    let clean = scrub_html_entities_for_xml(xml);

    match root_element(&clean).as_deref() {
        Some("rss") => {
            let rss: Rss = from_str(&clean).context("parsing rss 2.0 feed")?;
            Ok(rss.channel.items.into_iter().map(rss_entry).collect())
        }
        Some("feed") => {
            let feed: AtomFeed = from_str(&clean).context("parsing atom feed")?;
            Ok(feed.entries.into_iter().map(atom_entry).collect())
        }
        Some(other) => Err(anyhow!("unrecognized feed root element <{other}>")),
        None => Err(anyhow!("no xml root element found")),
    }
}

fn root_element(xml: &str) -> Option<String> {
    let mut reader = quick_xml::Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                return Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned())
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

fn rss_entry(it: RssItem) -> RawEntry {
    RawEntry {
        title: it.title.unwrap_or_default(),
        link: it.link.unwrap_or_default(),
        summary: it.description.unwrap_or_default(),
        published: it.pub_date.unwrap_or_default(),
    }
}

fn atom_entry(e: AtomEntry) -> RawEntry {
    let link = e
        .links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| e.links.first())
        .and_then(|l| l.href.clone())
        .unwrap_or_default();

    let summary = {
        let s = text_of(e.summary);
        if s.is_empty() {
            text_of(e.content)
        } else {
            s
        }
    };

    RawEntry {
        title: text_of(e.title),
        link,
        summary,
        published: e.published.or(e.updated).unwrap_or_default(),
    }
}

fn text_of(t: Option<AtomText>) -> String {
    t.and_then(|t| t.value).unwrap_or_default()
}

// Named entities that are valid HTML but not valid XML; seen in the wild
// in feed payloads that were pasted rather than escaped.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
