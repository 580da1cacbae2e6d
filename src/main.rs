//! `EstateFlow` reminder daemon.
//!
//! Long-running process that wakes up every hour, runs the throttled rent
//! reminder scan, and logs the month's insights after each scan that
//! actually ran.

use chrono::Utc;
use dotenvy::dotenv;
use estateflow::{
    config::{database, settings},
    core::{billing, insights, reminder, room},
    errors::Result,
};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const WAKE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenv().ok();

    let settings = settings::load_default_settings().unwrap_or_else(|e| {
        warn!("No usable config.toml, continuing with defaults: {e}");
        settings::Settings::default()
    });

    let db = database::create_connection().await?;
    database::create_tables(&db).await?;
    info!("Database initialized");

    let seeded = room::seed_initial_rooms(&db, &settings.rooms).await?;
    if seeded > 0 {
        info!(seeded, "Seeded rooms from config");
    }

    info!(
        interval_hours = settings.reminder.scan_interval_hours,
        window_days = settings.reminder.upcoming_window_days,
        "Reminder daemon started"
    );

    let mut ticker = tokio::time::interval(WAKE_INTERVAL);
    loop {
        ticker.tick().await;

        let now = Utc::now();
        match reminder::run_scan_if_due(&db, now, &settings.reminder).await {
            Ok(Some(outcome)) => {
                info!(
                    tenants = outcome.tenants_scanned,
                    upcoming = outcome.upcoming_sent,
                    overdue = outcome.overdue_sent,
                    "Reminder scan ran"
                );
                log_insights(&db, now).await;
            }
            Ok(None) => {}
            Err(e) => warn!("Reminder scan failed: {e}"),
        }
    }
}

async fn log_insights(db: &sea_orm::DatabaseConnection, now: chrono::DateTime<Utc>) {
    let today = now.date_naive();
    let (year, month) = billing::billing_month_of(today);
    match insights::generate_insights(db, year, month, today).await {
        Ok(list) => {
            for insight in list {
                info!(
                    severity = %insight.severity,
                    "{}: {}",
                    insight.title,
                    insight.message
                );
            }
        }
        Err(e) => warn!("Failed to generate insights: {e}"),
    }
}
