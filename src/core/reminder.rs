//! Rent reminder scan - Periodic sweep over active tenants.
//!
//! The scan walks every active tenant's statement for the current billing
//! month and notifies those with an outstanding balance: an overdue reminder
//! once the due date has passed, or an upcoming reminder when the due date
//! falls within the configured window. Each tenant gets at most one reminder
//! of each kind per month, and the scan itself is throttled through a
//! timestamp in the `system_state` table so restarts cannot re-trigger it.

use crate::{
    config::settings::ReminderConfig,
    core::{
        billing::{self, month_key},
        notification, tenant as tenant_ops,
    },
    entities::{SystemState, system_state},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{debug, info};

const LAST_REMINDER_SCAN_KEY: &str = "last_reminder_scan";
const SCAN_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// What one reminder scan did.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// When the scan ran
    pub scan_time: DateTime<Utc>,
    /// Number of active tenants examined
    pub tenants_scanned: usize,
    /// Upcoming-rent reminders created
    pub upcoming_sent: usize,
    /// Overdue-rent reminders created
    pub overdue_sent: usize,
}

/// Retrieves the time of the last reminder scan from the `system_state` table.
pub async fn get_last_scan_time(db: &DatabaseConnection) -> Result<Option<DateTime<Utc>>> {
    let state = SystemState::find()
        .filter(system_state::Column::Key.eq(LAST_REMINDER_SCAN_KEY))
        .one(db)
        .await?;

    match state {
        Some(s) => NaiveDateTime::parse_from_str(&s.value, SCAN_TIME_FORMAT)
            .map(|naive| Some(naive.and_utc()))
            .map_err(|e| Error::Config {
                message: format!("Failed to parse last scan time: {e}"),
            }),
        None => Ok(None),
    }
}

/// Records the time of a reminder scan in the `system_state` table.
async fn set_last_scan_time(db: &DatabaseConnection, time: DateTime<Utc>) -> Result<()> {
    let value = time.naive_utc().format(SCAN_TIME_FORMAT).to_string();
    let now = Utc::now().naive_utc();

    let existing = SystemState::find()
        .filter(system_state::Column::Key.eq(LAST_REMINDER_SCAN_KEY))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active_model: system_state::ActiveModel = state.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_state = system_state::ActiveModel {
            key: Set(LAST_REMINDER_SCAN_KEY.to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        };
        new_state.insert(db).await?;
    }

    Ok(())
}

/// Checks whether enough time has passed since the last scan.
/// Returns true when no scan has ever run.
pub async fn is_scan_due(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
    scan_interval_hours: i64,
) -> Result<bool> {
    let last_scan = get_last_scan_time(db).await?;
    Ok(last_scan.is_none_or(|last| {
        now.signed_duration_since(last) >= chrono::Duration::hours(scan_interval_hours)
    }))
}

/// Runs one reminder sweep over all active tenants, unconditionally.
///
/// Reminders are deduplicated per tenant, kind, and billing month through the
/// notification `period` column, so running the sweep repeatedly within a
/// month creates nothing new. Records the scan time when done.
pub async fn run_scan(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
    upcoming_window_days: i64,
) -> Result<ScanOutcome> {
    let today = now.date_naive();
    let (year, month) = billing::billing_month_of(today);
    let period = month_key(year, month);

    let tenants = tenant_ops::get_active_tenants(db).await?;
    let tenants_scanned = tenants.len();
    let mut upcoming_sent = 0;
    let mut overdue_sent = 0;

    for t in tenants {
        let stmt = billing::tenant_statement(db, t.id, year, month, today).await?;
        if stmt.balance_due <= 0.0 {
            continue;
        }

        if today > stmt.due_date {
            if !notification::has_notification(
                db,
                t.id,
                notification::KIND_RENT_OVERDUE,
                &period,
            )
            .await?
            {
                notification::create_notification(
                    db,
                    t.id,
                    notification::KIND_RENT_OVERDUE,
                    Some(period.clone()),
                    format!(
                        "Rent of ₹{:.2} is overdue since {}",
                        stmt.balance_due,
                        stmt.due_date.format("%d %b %Y")
                    ),
                )
                .await?;
                overdue_sent += 1;
            }
        } else {
            let days_left = stmt.due_date.signed_duration_since(today).num_days();
            if days_left <= upcoming_window_days
                && !notification::has_notification(
                    db,
                    t.id,
                    notification::KIND_RENT_UPCOMING,
                    &period,
                )
                .await?
            {
                notification::create_notification(
                    db,
                    t.id,
                    notification::KIND_RENT_UPCOMING,
                    Some(period.clone()),
                    format!(
                        "Rent of ₹{:.2} is due on {}",
                        stmt.balance_due,
                        stmt.due_date.format("%d %b %Y")
                    ),
                )
                .await?;
                upcoming_sent += 1;
            }
        }
    }

    set_last_scan_time(db, now).await?;

    info!(
        tenants_scanned,
        upcoming_sent, overdue_sent, "Reminder scan complete"
    );

    Ok(ScanOutcome {
        scan_time: now,
        tenants_scanned,
        upcoming_sent,
        overdue_sent,
    })
}

/// Runs a scan only if the configured interval has elapsed since the last one.
///
/// Returns `Ok(None)` when the scan was skipped.
pub async fn run_scan_if_due(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
    config: &ReminderConfig,
) -> Result<Option<ScanOutcome>> {
    if !is_scan_due(db, now, config.scan_interval_hours).await? {
        debug!("Reminder scan skipped, interval not yet elapsed");
        return Ok(None);
    }
    run_scan(db, now, config.upcoming_window_days).await.map(Some)
}
