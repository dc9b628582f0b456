//! Compute activity stats and the current month's calendar for a snapshot file.
//!
//! ```bash
//! cargo run --example wallet_report -- path/to/snapshot.json
//! ```
//!
//! Without an argument a small in-memory wallet is used.

use anyhow::Result;
use chrono::Utc;
use mintscope::db::{services, LocalRepository};
use mintscope::models::{CollectionRef, DisplayMetadata, EventDef, OwnedAsset, YearMonth};
use mintscope::parsing::load_snapshot_from_path;
use mintscope::{ActivityEngine, EngineConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = EngineConfig::from_default_location().unwrap_or_default();
    let engine = ActivityEngine::new(config);
    let now = Utc::now();

    let snapshot = match std::env::args().nth(1) {
        Some(path) => load_snapshot_from_path(path)?,
        None => services::load_snapshot(&demo_repository(now), "0xdemo").await,
    };

    let stats = engine.activity_stats(&snapshot, now);
    println!("{}", serde_json::to_string_pretty(&stats)?);

    let calendar = engine.calendar_projection(&snapshot, YearMonth::of_instant(now), now);
    println!(
        "{}: {} participations, {} upcoming",
        calendar.month,
        calendar.participation_count(),
        calendar.upcoming_count()
    );
    Ok(())
}

fn demo_repository(now: chrono::DateTime<Utc>) -> LocalRepository {
    let repo = LocalRepository::new();
    repo.add_collection(CollectionRef::new("badges", "Badges").with_package_id("0xabc"));
    repo.add_event(EventDef::new("meetup", "Builders Meetup", "0xabc"));
    repo.add_asset(
        "0xdemo",
        OwnedAsset::new("0x1", "0xabc::badge::Badge").with_display(DisplayMetadata {
            name: Some("Builders Meetup".to_string()),
            event_date: Some(now.to_rfc3339()),
            ..Default::default()
        }),
    );
    repo.set_onchain_count("badges", 250);
    repo
}
