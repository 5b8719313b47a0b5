// src/digest.rs
//! Renders the briefing document: items grouped by category into one
//! self-contained HTML page. Styles are inline only, since mail clients
//! strip external assets.

use chrono::Utc;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::classify;
use crate::item::Item;

pub const MAX_TOTAL: usize = 40;
pub const MAX_PER_CATEGORY: usize = 10;
/// Character budget for a rendered summary (chars, not bytes).
pub const SUMMARY_CHARS: usize = 220;

pub fn digest_subject(count: usize) -> String {
    format!(
        "Daily briefing {}: {} new item{}",
        Utc::now().format("%Y-%m-%d"),
        count,
        if count == 1 { "" } else { "s" }
    )
}

/// Build the digest HTML. Items arrive newest-first; the first `max_total`
/// are kept, then fanned out into one section per category in table order.
/// An item with N tags appears in N sections; empty sections are omitted.
pub fn build_digest(items: &[Item], max_per_category: usize, max_total: usize) -> String {
    let items = &items[..items.len().min(max_total)];
    let today = Utc::now().format("%Y-%m-%d");

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head>");
    html.push_str(
        "<body style=\"font-family:Arial,Helvetica,sans-serif;color:#222;margin:0;padding:16px;\">",
    );
    html.push_str(&format!(
        "<h1 style=\"font-size:20px;margin:0 0 4px;\">Daily briefing</h1>\
         <p style=\"color:#666;margin:0 0 16px;\">{} UTC, {} item{}</p>",
        today,
        items.len(),
        if items.len() == 1 { "" } else { "s" }
    ));

    for label in classify::category_order() {
        let group: Vec<&Item> = items
            .iter()
            .filter(|it| it.tags.iter().any(|t| t == label))
            .collect();
        if group.is_empty() {
            continue;
        }

        html.push_str(&format!(
            "<h2 style=\"font-size:16px;border-bottom:1px solid #ddd;\
             padding-bottom:4px;margin:20px 0 8px;\">{}</h2>",
            encode_text(label)
        ));
        for it in group.iter().take(max_per_category) {
            render_item(&mut html, it);
        }
    }

    html.push_str("</body></html>");
    html
}

fn render_item(html: &mut String, it: &Item) {
    // Date portion only; blank when the feed had no usable timestamp.
    let date: String = it.published.chars().take(10).collect();
    let summary = truncate_summary(&it.summary);

    html.push_str(&format!(
        "<div style=\"margin:0 0 12px;\">\
         <a href=\"{}\" style=\"font-weight:bold;color:#1a0dab;text-decoration:none;\">{}</a>\
         <span style=\"color:#999;font-size:12px;\"> {}</span>\
         <div style=\"color:#444;font-size:13px;\">{}</div>\
         </div>",
        encode_double_quoted_attribute(&it.link),
        encode_text(&it.title),
        encode_text(&date),
        encode_text(&summary),
    ));
}

/// Cap a summary at [`SUMMARY_CHARS`] characters, marking the cut with an
/// ellipsis.
pub fn truncate_summary(s: &str) -> String {
    if s.chars().count() <= SUMMARY_CHARS {
        return s.to_string();
    }
    let mut out: String = s.chars().take(SUMMARY_CHARS).collect();
    out.push('…');
    out
}
