//! Payment business logic - Recorded rent payments.
//!
//! A payment row is an owner-confirmed fact; tenant-submitted proofs live in
//! `core::approval` until approved. Amounts must be positive and finite.

use crate::{
    core::billing::{month_bounds, round_to_paise},
    entities::{Payment, Tenant, payment},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Records a payment for a tenant.
///
/// Validates that the amount is positive and finite and that the tenant
/// exists. The payment date decides which month the payment settles.
pub async fn record_payment(
    db: &DatabaseConnection,
    tenant_id: i64,
    amount: f64,
    payment_date: NaiveDate,
    method: String,
) -> Result<payment::Model> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    let exists = Tenant::find_by_id(tenant_id).one(db).await?;
    if exists.is_none() {
        return Err(Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        });
    }

    let model = payment::ActiveModel {
        tenant_id: Set(tenant_id),
        amount: Set(round_to_paise(amount)),
        payment_date: Set(payment_date),
        method: Set(method),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Records a payment on a transaction handle; used by the approval flow.
pub(crate) async fn record_payment_in_txn<C>(
    db: &C,
    tenant_id: i64,
    amount: f64,
    payment_date: NaiveDate,
    method: String,
) -> Result<payment::Model>
where
    C: ConnectionTrait,
{
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }

    let model = payment::ActiveModel {
        tenant_id: Set(tenant_id),
        amount: Set(round_to_paise(amount)),
        payment_date: Set(payment_date),
        method: Set(method),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all payments of a tenant, newest first.
pub async fn get_payments_for_tenant(
    db: &DatabaseConnection,
    tenant_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::TenantId.eq(tenant_id))
        .order_by_desc(payment::Column::PaymentDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every payment dated in the given month, across all tenants.
pub async fn get_payments_in_month(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
) -> Result<Vec<payment::Model>> {
    let (first, last) = month_bounds(year, month)?;
    Payment::find()
        .filter(payment::Column::PaymentDate.between(first, last))
        .order_by_asc(payment::Column::PaymentDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums a tenant's payments dated in the given month.
pub async fn total_paid_in_month(
    db: &DatabaseConnection,
    tenant_id: i64,
    year: i32,
    month: u32,
) -> Result<f64> {
    let (first, last) = month_bounds(year, month)?;
    let payments = Payment::find()
        .filter(payment::Column::TenantId.eq(tenant_id))
        .filter(payment::Column::PaymentDate.between(first, last))
        .all(db)
        .await?;
    Ok(round_to_paise(payments.iter().map(|p| p.amount).sum()))
}

/// Deletes a payment (owner-side correction of a mistaken entry).
pub async fn delete_payment(db: &DatabaseConnection, payment_id: i64) -> Result<()> {
    let payment = Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .ok_or(Error::RecordNotFound {
            entity: "payment",
            id: payment_id,
        })?;

    Payment::delete_by_id(payment.id).exec(db).await?;
    Ok(())
}
