//! Rule-based insights - Owner-facing highlights derived from a month's data.
//!
//! No statistics or learning, just fixed rules over the billing aggregates:
//! vacancy across rooms, the best-collecting room, the most reliable payer,
//! and how many tenants are overdue.

use crate::{
    core::{
        billing::{self, month_key, round_to_paise, PaymentStatus},
        payment, room as room_ops, tenant as tenant_ops,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// How urgent an insight is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth knowing
    Info,
    /// Needs attention
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One generated highlight.
#[derive(Debug, Clone)]
pub struct Insight {
    /// How urgent this is
    pub severity: Severity,
    /// Short label, e.g. "Vacancy"
    pub title: String,
    /// Human-readable detail
    pub message: String,
}

/// Vacancy rate threshold above which the insight escalates to a warning.
const VACANCY_WARNING_RATE: f64 = 0.30;

/// How many consecutive fully-paid months make a consistent payer.
const CONSISTENT_MONTHS: u32 = 3;

/// Fraction of beds unoccupied, in 0.0..=1.0. Zero capacity counts as full.
#[must_use]
pub fn vacancy_rate(total_capacity: i64, occupied: i64) -> f64 {
    if total_capacity <= 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = (total_capacity - occupied).max(0) as f64 / total_capacity as f64;
    rate
}

fn vacancy_insight(total_capacity: i64, occupied: i64) -> Option<Insight> {
    let vacant = (total_capacity - occupied).max(0);
    if vacant == 0 {
        return None;
    }
    let rate = vacancy_rate(total_capacity, occupied);
    let severity = if rate > VACANCY_WARNING_RATE {
        Severity::Warning
    } else {
        Severity::Info
    };
    Some(Insight {
        severity,
        title: "Vacancy".to_string(),
        message: format!(
            "{vacant} of {total_capacity} beds vacant ({:.0}% vacancy)",
            rate * 100.0
        ),
    })
}

fn top_room_insight(year: i32, month: u32, collected: &[(String, f64)]) -> Option<Insight> {
    let (number, total) = collected
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if *total <= 0.0 {
        return None;
    }
    Some(Insight {
        severity: Severity::Info,
        title: "Top room".to_string(),
        message: format!(
            "Room {number} collected the most in {}: ₹{total:.2}",
            month_key(year, month)
        ),
    })
}

fn overdue_insight(overdue_count: usize) -> Option<Insight> {
    if overdue_count == 0 {
        return None;
    }
    let plural = if overdue_count == 1 { "tenant" } else { "tenants" };
    Some(Insight {
        severity: Severity::Warning,
        title: "Overdue".to_string(),
        message: format!("{overdue_count} {plural} past the due date with rent outstanding"),
    })
}

/// Generates the month's insights in a fixed order: vacancy, top room,
/// consistent payer, overdue.
pub async fn generate_insights(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<Vec<Insight>> {
    let mut insights = Vec::new();

    // Vacancy across all rooms
    let rooms = room_ops::get_all_rooms(db).await?;
    let tenants = tenant_ops::get_all_tenants(db).await?;
    let total_capacity: i64 = rooms.iter().map(|r| i64::from(r.capacity)).sum();
    // Cast safety: tenant counts are tiny
    #[allow(clippy::cast_possible_wrap)]
    let occupied = tenants.iter().filter(|t| t.is_active).count() as i64;
    if let Some(insight) = vacancy_insight(total_capacity, occupied) {
        insights.push(insight);
    }

    // Room that collected the most this month
    let payments = payment::get_payments_in_month(db, year, month).await?;
    let tenant_room: HashMap<i64, i64> = tenants.iter().map(|t| (t.id, t.room_id)).collect();
    let mut per_room: HashMap<i64, f64> = HashMap::new();
    for p in &payments {
        if let Some(room_id) = tenant_room.get(&p.tenant_id) {
            *per_room.entry(*room_id).or_insert(0.0) += p.amount;
        }
    }
    let collected: Vec<(String, f64)> = rooms
        .iter()
        .map(|r| {
            (
                r.number.clone(),
                round_to_paise(per_room.get(&r.id).copied().unwrap_or(0.0)),
            )
        })
        .collect();
    if let Some(insight) = top_room_insight(year, month, &collected) {
        insights.push(insight);
    }

    // Most reliable payer over the last few months
    if let Some(insight) = consistent_payer_insight(db, year, month, today).await? {
        insights.push(insight);
    }

    // Overdue headcount for the month
    let summary = billing::monthly_summary(db, year, month, today).await?;
    let overdue_count = summary
        .statements
        .iter()
        .filter(|s| s.status == PaymentStatus::Overdue)
        .count();
    if let Some(insight) = overdue_insight(overdue_count) {
        insights.push(insight);
    }

    Ok(insights)
}

/// Finds the active tenant who fully settled each of the last
/// `CONSISTENT_MONTHS` months (including the current one). The tenant's lease
/// must cover the whole window, and ties go to the one who paid the most.
async fn consistent_payer_insight(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<Option<Insight>> {
    // The window runs backwards from the current month
    let mut months = Vec::with_capacity(CONSISTENT_MONTHS as usize);
    let (mut y, mut m) = (year, month);
    for _ in 0..CONSISTENT_MONTHS {
        months.push((y, m));
        (y, m) = billing::previous_month(y, m);
    }
    let (earliest_year, earliest_month) = months[months.len() - 1];
    let window_start = billing::month_bounds(earliest_year, earliest_month)?.0;

    let mut best: Option<(String, f64)> = None;
    for tenant in tenant_ops::get_active_tenants(db).await? {
        if tenant.lease_start > window_start {
            continue;
        }

        let mut total_paid = 0.0;
        let mut settled_all = true;
        for &(wy, wm) in &months {
            let stmt = billing::tenant_statement(db, tenant.id, wy, wm, today).await?;
            if stmt.total_billed <= 0.0 || stmt.paid < stmt.total_billed {
                settled_all = false;
                break;
            }
            total_paid += stmt.paid;
        }
        if !settled_all {
            continue;
        }

        if best.as_ref().is_none_or(|(_, paid)| total_paid > *paid) {
            best = Some((tenant.name, total_paid));
        }
    }

    Ok(best.map(|(name, _)| Insight {
        severity: Severity::Info,
        title: "Consistent payer".to_string(),
        message: format!("{name} has paid in full for {CONSISTENT_MONTHS} months running"),
    }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn find<'a>(insights: &'a [Insight], title: &str) -> Option<&'a Insight> {
        insights.iter().find(|i| i.title == title)
    }

    #[test]
    fn test_vacancy_rate() {
        assert_eq!(vacancy_rate(10, 7), 0.3);
        assert_eq!(vacancy_rate(4, 4), 0.0);
        assert_eq!(vacancy_rate(0, 0), 0.0);
        // Over-occupancy never goes negative
        assert_eq!(vacancy_rate(2, 3), 0.0);
    }

    #[test]
    fn test_vacancy_insight_thresholds() {
        assert!(vacancy_insight(4, 4).is_none());

        // 1 of 4 vacant = 25%, stays informational
        let insight = vacancy_insight(4, 3).unwrap();
        assert_eq!(insight.severity, Severity::Info);

        // 2 of 4 vacant = 50%, escalates
        let insight = vacancy_insight(4, 2).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.message.contains("50% vacancy"));
    }

    #[test]
    fn test_overdue_insight() {
        assert!(overdue_insight(0).is_none());
        let insight = overdue_insight(1).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.message.contains("1 tenant "));
        let insight = overdue_insight(3).unwrap();
        assert!(insight.message.contains("3 tenants"));
    }

    #[test]
    fn test_top_room_requires_collections() {
        assert!(top_room_insight(2026, 8, &[]).is_none());
        assert!(
            top_room_insight(2026, 8, &[("101".to_string(), 0.0)]).is_none()
        );

        let collected = vec![("101".to_string(), 4000.0), ("102".to_string(), 9000.0)];
        let insight = top_room_insight(2026, 8, &collected).unwrap();
        assert!(insight.message.contains("Room 102"));
        assert!(insight.message.contains("₹9000.00"));
    }

    #[tokio::test]
    async fn test_generate_insights_vacancy_and_overdue() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_custom_room(&db, "101", 3, 9000.0).await?;
        create_test_tenant(&db, "Alice", room.id).await?;

        // Past the due day, nothing paid: 2 of 3 beds vacant, 1 overdue
        let insights = generate_insights(&db, 2026, 8, date(2026, 8, 10)).await?;

        let vacancy = find(&insights, "Vacancy").unwrap();
        assert_eq!(vacancy.severity, Severity::Warning);

        let overdue = find(&insights, "Overdue").unwrap();
        assert!(overdue.message.contains("1 tenant "));

        assert!(find(&insights, "Top room").is_none());
        assert!(find(&insights, "Consistent payer").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_generate_insights_top_room() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_custom_room(&db, "101", 1, 4000.0).await?;
        let second = create_custom_room(&db, "102", 1, 9000.0).await?;
        let alice = create_test_tenant(&db, "Alice", first.id).await?;
        let bob = create_test_tenant(&db, "Bob", second.id).await?;

        create_test_payment(&db, alice.id, 4000.0, date(2026, 8, 2)).await?;
        create_test_payment(&db, bob.id, 9000.0, date(2026, 8, 2)).await?;

        let insights = generate_insights(&db, 2026, 8, date(2026, 8, 3)).await?;
        let top = find(&insights, "Top room").unwrap();
        assert!(top.message.contains("Room 102"));

        Ok(())
    }

    #[tokio::test]
    async fn test_consistent_payer_needs_three_settled_months() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_custom_room(&db, "101", 2, 8000.0).await?;
        // Both on the lease since January, each owing 4000 a month
        let alice = create_test_tenant(&db, "Alice", room.id).await?;
        let bob = create_test_tenant(&db, "Bob", room.id).await?;

        // Alice pays June, July, and August in full; Bob misses July
        for month in [6, 7, 8] {
            create_test_payment(&db, alice.id, 4000.0, date(2026, month, 3)).await?;
        }
        create_test_payment(&db, bob.id, 4000.0, date(2026, 6, 3)).await?;
        create_test_payment(&db, bob.id, 4000.0, date(2026, 8, 3)).await?;

        let insights = generate_insights(&db, 2026, 8, date(2026, 8, 20)).await?;
        let payer = find(&insights, "Consistent payer").unwrap();
        assert!(payer.message.contains("Alice"));

        Ok(())
    }

    #[tokio::test]
    async fn test_consistent_payer_requires_lease_coverage() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_custom_room(&db, "101", 1, 4000.0).await?;
        // Lease starts mid-window, so July and August payments are not enough
        let alice = create_custom_tenant(
            &db,
            "Alice",
            "alice",
            room.id,
            5,
            date(2026, 7, 1),
            None,
        )
        .await?;
        create_test_payment(&db, alice.id, 4000.0, date(2026, 7, 3)).await?;
        create_test_payment(&db, alice.id, 4000.0, date(2026, 8, 3)).await?;

        let insights = generate_insights(&db, 2026, 8, date(2026, 8, 20)).await?;
        assert!(find(&insights, "Consistent payer").is_none());

        Ok(())
    }
}
