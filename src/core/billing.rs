//! Monthly billing aggregation - the shared arithmetic behind every view.
//!
//! A tenant's statement for a month is their rent share, plus the ad hoc
//! charges dated in that month, minus the payments dated in that month. The
//! resulting balance is classified as Paid, Partial, Due, or Overdue relative
//! to the tenant's due date. The same aggregation rolls up into a per-month
//! summary across all active tenants.

use crate::{
    core::{payment, tenant as tenant_ops},
    entities::{OtherCharge, other_charge, tenant},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{DatabaseConnection, QueryOrder, prelude::*};

/// Rounds a money amount to whole paise (2 decimal places).
#[must_use]
pub fn round_to_paise(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Returns the first and last day of the given month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| Error::Validation {
        message: format!("Invalid month: {year}-{month:02}"),
    })?;
    let (next_year, next_month) = next_month(year, month);
    // Last day of the month is the day before the first of the next month
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| Error::Validation {
            message: format!("Invalid month: {year}-{month:02}"),
        })?
        .pred_opt()
        .ok_or_else(|| Error::Validation {
            message: format!("Invalid month: {year}-{month:02}"),
        })?;
    Ok((first, last))
}

/// Formats a billing period key like `"2026-08"`.
#[must_use]
pub fn month_key(year: i32, month: u32) -> String {
    format!("{year}-{month:02}")
}

/// Returns the month after the given one.
#[must_use]
pub const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// Returns the month before the given one.
#[must_use]
pub const fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// Returns the date the rent falls due in the given month.
///
/// `due_day` is restricted to 1..=28 at tenant creation, so the date exists
/// in every month; out-of-range values are clamped rather than rejected here.
pub fn due_date_in_month(due_day: i32, year: i32, month: u32) -> Result<NaiveDate> {
    let day = due_day.clamp(1, 28);
    // Cast safety: day ∈ [1, 28] after the clamp
    #[allow(clippy::cast_sign_loss)]
    NaiveDate::from_ymd_opt(year, month, day as u32).ok_or_else(|| Error::Validation {
        message: format!("Invalid due date: {year}-{month:02}-{day:02}"),
    })
}

/// Payment status of a tenant's monthly statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Fully settled (or nothing billed)
    Paid,
    /// Partly paid, due date not yet passed
    Partial,
    /// Nothing paid, due date not yet passed
    Due,
    /// Balance outstanding past the due date
    Overdue,
}

impl PaymentStatus {
    /// Stable string form used in messages and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Partial => "partial",
            Self::Due => "due",
            Self::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a statement balance against its due date.
///
/// A partial payment past the due date still counts as Overdue; a month with
/// nothing billed is Paid.
#[must_use]
pub fn classify(total_billed: f64, paid: f64, due_date: NaiveDate, today: NaiveDate) -> PaymentStatus {
    if total_billed <= 0.0 || paid >= total_billed {
        return PaymentStatus::Paid;
    }
    let past_due = today > due_date;
    if past_due {
        PaymentStatus::Overdue
    } else if paid > 0.0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Due
    }
}

/// A tenant's aggregated bill for one month.
#[derive(Debug, Clone)]
pub struct TenantStatement {
    /// The tenant being billed
    pub tenant: tenant::Model,
    /// Billing year
    pub year: i32,
    /// Billing month (1-12)
    pub month: u32,
    /// Per-person rent share for the month
    pub rent: f64,
    /// Ad hoc charges dated in the month
    pub charges: Vec<other_charge::Model>,
    /// Sum of the ad hoc charges
    pub charges_total: f64,
    /// Rent plus charges
    pub total_billed: f64,
    /// Payments dated in the month
    pub paid: f64,
    /// Outstanding amount, clamped at zero when overpaid
    pub balance_due: f64,
    /// Date the rent fell due this month
    pub due_date: NaiveDate,
    /// Classification of the balance
    pub status: PaymentStatus,
}

/// Builds a tenant's statement for the given month.
///
/// Charges and payments count toward the month of their date; the rent share
/// is the tenant's current `rent_amount`.
pub async fn tenant_statement(
    db: &DatabaseConnection,
    tenant_id: i64,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<TenantStatement> {
    let tenant = tenant_ops::get_tenant_by_id(db, tenant_id)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        })?;

    let (first, last) = month_bounds(year, month)?;

    let charges = OtherCharge::find()
        .filter(other_charge::Column::TenantId.eq(tenant_id))
        .filter(other_charge::Column::ChargeDate.between(first, last))
        .order_by_asc(other_charge::Column::ChargeDate)
        .all(db)
        .await?;

    let charges_total = round_to_paise(charges.iter().map(|c| c.amount).sum());
    let paid = payment::total_paid_in_month(db, tenant_id, year, month).await?;

    let rent = tenant.rent_amount;
    let total_billed = round_to_paise(rent + charges_total);
    let balance_due = round_to_paise((total_billed - paid).max(0.0));
    let due_date = due_date_in_month(tenant.due_day, year, month)?;
    let status = classify(total_billed, paid, due_date, today);

    Ok(TenantStatement {
        tenant,
        year,
        month,
        rent,
        charges,
        charges_total,
        total_billed,
        paid,
        balance_due,
        due_date,
        status,
    })
}

/// Aggregated billing position for one month across all active tenants.
#[derive(Debug, Clone)]
pub struct MonthlySummary {
    /// Billing year
    pub year: i32,
    /// Billing month (1-12)
    pub month: u32,
    /// Sum of everything billed
    pub total_billed: f64,
    /// Sum of everything collected
    pub total_collected: f64,
    /// Sum of outstanding balances
    pub total_pending: f64,
    /// Per-tenant statements, ordered by tenant name
    pub statements: Vec<TenantStatement>,
}

/// Rolls up statements for every active tenant into a monthly summary.
pub async fn monthly_summary(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthlySummary> {
    let tenants = tenant_ops::get_active_tenants(db).await?;

    let mut statements = Vec::with_capacity(tenants.len());
    for t in tenants {
        statements.push(tenant_statement(db, t.id, year, month, today).await?);
    }

    let total_billed = round_to_paise(statements.iter().map(|s| s.total_billed).sum());
    let total_collected = round_to_paise(statements.iter().map(|s| s.paid).sum());
    let total_pending = round_to_paise(statements.iter().map(|s| s.balance_due).sum());

    Ok(MonthlySummary {
        year,
        month,
        total_billed,
        total_collected,
        total_pending,
        statements,
    })
}

/// Convenience accessor for the billing month a date falls in.
#[must_use]
pub fn billing_month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
