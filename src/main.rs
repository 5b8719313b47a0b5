//! Daily Briefing — batch entrypoint.
//!
//! One invocation performs one pipeline pass and exits: collect feeds,
//! drop already-seen items, render the digest, email it, persist the seen
//! state. Scheduling and serialization of runs belong to the caller
//! (a cron slot or equivalent).

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use daily_briefing::collect::sources::load_sources;
use daily_briefing::collect::{collect_all, HttpFetcher};
use daily_briefing::config::BriefingConfig;
use daily_briefing::digest::{build_digest, digest_subject};
use daily_briefing::mail::EmailSender;
use daily_briefing::seen::SeenState;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("daily_briefing=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env for local runs; a no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = BriefingConfig::load_default()?;
    let sources = load_sources(&cfg.feeds_path)?;
    info!(sources = sources.len(), "starting briefing run");

    let fetcher = HttpFetcher::new()?;
    let items = collect_all(&fetcher, &sources).await;
    info!(collected = items.len(), "feeds collected");

    let mut state = SeenState::load(&cfg.state_path)?;
    let fresh = state.filter_new(items);
    if fresh.is_empty() {
        info!("no new items, skipping email");
        return Ok(());
    }

    let delivered: Vec<_> = fresh.into_iter().take(cfg.max_total).collect();
    let html = build_digest(&delivered, cfg.max_per_category, cfg.max_total);
    let subject = digest_subject(delivered.len());

    let sender = EmailSender::from_env()?;
    sender.send(&subject, &html).await?;
    info!(delivered = delivered.len(), "briefing sent");

    // Persist only after a successful send, so a failed run re-sends on
    // the next pass instead of silently dropping items.
    state.record(&delivered);
    state.save(&cfg.state_path)?;
    Ok(())
}
