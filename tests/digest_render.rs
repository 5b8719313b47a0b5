// tests/digest_render.rs
use daily_briefing::digest::{build_digest, digest_subject, MAX_PER_CATEGORY, MAX_TOTAL};
use daily_briefing::item::Item;

fn item(title: &str, tags: &[&str], published: &str, summary: &str) -> Item {
    Item {
        key: daily_briefing::derive_key(title, title),
        title: title.to_string(),
        link: format!(
            "https://example.com/{}",
            title
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        ),
        summary: summary.to_string(),
        published: published.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn items_with_two_tags_appear_in_both_sections() {
    let items = vec![item(
        "Compliance retail sweep",
        &["Regulation & Compliance", "Retail & Channel"],
        "2024-01-02T03:04:05Z",
        "s",
    )];
    let html = build_digest(&items, MAX_PER_CATEGORY, MAX_TOTAL);

    assert!(html.contains("Regulation &amp; Compliance"));
    assert!(html.contains("Retail &amp; Channel"));
    assert_eq!(html.matches("Compliance retail sweep").count(), 2);
}

#[test]
fn empty_categories_are_omitted() {
    let items = vec![item("Plain item", &["Other"], "", "s")];
    let html = build_digest(&items, MAX_PER_CATEGORY, MAX_TOTAL);

    assert!(html.contains("<h2"));
    assert!(html.contains("Other"));
    assert!(!html.contains("Supply Chain"));
    assert!(!html.contains("Science &amp; Research"));
}

#[test]
fn summary_is_truncated_with_an_ellipsis() {
    let long = "x".repeat(300);
    let short = "y".repeat(100);
    let items = vec![
        item("Long one", &["Other"], "", &long),
        item("Short one", &["Other"], "", &short),
    ];
    let html = build_digest(&items, MAX_PER_CATEGORY, MAX_TOTAL);

    let cut: String = "x".repeat(220) + "…";
    assert!(html.contains(&cut));
    assert!(!html.contains(&"x".repeat(221)));
    assert!(html.contains(&short));
}

#[test]
fn dates_show_only_the_date_portion() {
    let items = vec![
        item("Dated", &["Other"], "2024-01-02T03:04:05Z", "s"),
        item("Undated", &["Other"], "", "s"),
    ];
    let html = build_digest(&items, MAX_PER_CATEGORY, MAX_TOTAL);

    assert!(html.contains("2024-01-02"));
    assert!(!html.contains("03:04:05"));
}

#[test]
fn header_counts_the_included_items_after_truncation() {
    let items: Vec<Item> = (0..6)
        .map(|n| item(&format!("Item number {n}"), &["Other"], "", "s"))
        .collect();
    let html = build_digest(&items, MAX_PER_CATEGORY, 3);

    assert!(html.contains("3 items"));
    assert!(html.contains("Item number 2"));
    assert!(!html.contains("Item number 3"));
}

#[test]
fn sections_cap_items_per_category() {
    let items: Vec<Item> = (0..12)
        .map(|n| item(&format!("Capped item {n:02}"), &["Other"], "", "s"))
        .collect();
    let html = build_digest(&items, 10, MAX_TOTAL);

    assert!(html.contains("Capped item 09"));
    assert!(!html.contains("Capped item 10"));
}

#[test]
fn markup_in_titles_is_escaped() {
    let items = vec![item("Tricky <script> title", &["Other"], "", "s")];
    let html = build_digest(&items, MAX_PER_CATEGORY, MAX_TOTAL);

    assert!(!html.contains("<script>"));
    assert!(html.contains("Tricky &lt;script&gt; title"));
}

#[test]
fn subject_names_the_item_count() {
    assert!(digest_subject(1).contains("1 new item"));
    assert!(digest_subject(7).contains("7 new items"));
}
