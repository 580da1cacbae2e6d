//! Payment-approval business logic - Tenant-submitted payment proofs.
//!
//! A tenant submits an amount, date, and optional screenshot; the owner then
//! approves (turning the proof into a real payment) or rejects it. Both
//! outcomes delete the pending row and notify the tenant, atomically.

use crate::{
    core::{billing::round_to_paise, notification, payment},
    entities::{PendingApproval, Tenant, pending_approval},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Submits a payment proof for owner approval.
pub async fn submit_proof(
    db: &DatabaseConnection,
    tenant_id: i64,
    amount: f64,
    payment_date: NaiveDate,
    screenshot_url: Option<String>,
) -> Result<pending_approval::Model> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    let tenant = Tenant::find_by_id(tenant_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        })?;
    if !tenant.is_active {
        return Err(Error::Validation {
            message: format!("Tenant {} is no longer active", tenant.name),
        });
    }

    let model = pending_approval::ActiveModel {
        tenant_id: Set(tenant_id),
        amount: Set(round_to_paise(amount)),
        payment_date: Set(payment_date),
        screenshot_url: Set(screenshot_url),
        submitted_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Retrieves all proofs awaiting approval, oldest first.
pub async fn list_pending(db: &DatabaseConnection) -> Result<Vec<pending_approval::Model>> {
    PendingApproval::find()
        .order_by_asc(pending_approval::Column::SubmittedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Approves a proof: records the payment, deletes the pending row, and
/// notifies the tenant. All three happen in one transaction.
pub async fn approve(
    db: &DatabaseConnection,
    approval_id: i64,
    method: String,
) -> Result<crate::entities::PaymentModel> {
    let txn = db.begin().await?;

    let approval = PendingApproval::find_by_id(approval_id)
        .one(&txn)
        .await?
        .ok_or(Error::RecordNotFound {
            entity: "pending approval",
            id: approval_id,
        })?;

    let recorded = payment::record_payment_in_txn(
        &txn,
        approval.tenant_id,
        approval.amount,
        approval.payment_date,
        method,
    )
    .await?;

    PendingApproval::delete_by_id(approval.id).exec(&txn).await?;

    notification::create_notification(
        &txn,
        approval.tenant_id,
        notification::KIND_PAYMENT_APPROVED,
        None,
        format!("Your payment of ₹{:.2} was approved", approval.amount),
    )
    .await?;

    txn.commit().await?;
    Ok(recorded)
}

/// Rejects a proof: deletes the pending row and notifies the tenant.
pub async fn reject(db: &DatabaseConnection, approval_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let approval = PendingApproval::find_by_id(approval_id)
        .one(&txn)
        .await?
        .ok_or(Error::RecordNotFound {
            entity: "pending approval",
            id: approval_id,
        })?;

    PendingApproval::delete_by_id(approval.id).exec(&txn).await?;

    notification::create_notification(
        &txn,
        approval.tenant_id,
        notification::KIND_PAYMENT_REJECTED,
        None,
        format!("Your payment claim of ₹{:.2} was rejected", approval.amount),
    )
    .await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::payment::get_payments_for_tenant;
    use crate::test_utils::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_submit_proof_validation() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let result = submit_proof(&db, tenant.id, 0.0, date(2026, 8, 3), None).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let result = submit_proof(&db, 999, 4000.0, date(2026, 8, 3), None).await;
        assert!(matches!(result, Err(Error::TenantNotFound { tenant: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_proof_inactive_tenant_refused() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;
        crate::core::tenant::vacate_tenant(&db, tenant.id, date(2026, 7, 31)).await?;

        let result = submit_proof(&db, tenant.id, 4000.0, date(2026, 8, 3), None).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_proof_rounds_to_paise() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let proof = submit_proof(&db, tenant.id, 4000.006, date(2026, 8, 3), None).await?;
        assert_eq!(proof.amount, 4000.01);

        // The approved payment carries the same rounded amount
        let payment = approve(&db, proof.id, "upi".to_string()).await?;
        assert_eq!(payment.amount, 4000.01);

        Ok(())
    }

    #[tokio::test]
    async fn test_approve_records_payment_and_notifies() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let proof = submit_proof(
            &db,
            tenant.id,
            4000.0,
            date(2026, 8, 3),
            Some("/uploads/proof.png".to_string()),
        )
        .await?;
        assert_eq!(list_pending(&db).await?.len(), 1);

        let payment = approve(&db, proof.id, "upi".to_string()).await?;
        assert_eq!(payment.tenant_id, tenant.id);
        assert_eq!(payment.amount, 4000.0);
        assert_eq!(payment.payment_date, date(2026, 8, 3));

        // Pending row is gone, payment exists, tenant was notified
        assert!(list_pending(&db).await?.is_empty());
        assert_eq!(get_payments_for_tenant(&db, tenant.id).await?.len(), 1);
        let notifications =
            notification::get_notifications_for_tenant(&db, tenant.id, false).await?;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, notification::KIND_PAYMENT_APPROVED);

        Ok(())
    }

    #[tokio::test]
    async fn test_reject_deletes_without_payment() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let proof = submit_proof(&db, tenant.id, 4000.0, date(2026, 8, 3), None).await?;
        reject(&db, proof.id).await?;

        assert!(list_pending(&db).await?.is_empty());
        assert!(get_payments_for_tenant(&db, tenant.id).await?.is_empty());
        let notifications =
            notification::get_notifications_for_tenant(&db, tenant.id, false).await?;
        assert_eq!(notifications[0].kind, notification::KIND_PAYMENT_REJECTED);

        Ok(())
    }

    #[tokio::test]
    async fn test_approve_missing_approval() -> Result<()> {
        let db = setup_test_db().await?;
        let result = approve(&db, 42, "cash".to_string()).await;
        assert!(matches!(
            result,
            Err(Error::RecordNotFound { entity: "pending approval", id: 42 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_pending_listed_oldest_first() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let first = submit_proof(&db, tenant.id, 1000.0, date(2026, 8, 1), None).await?;
        let second = submit_proof(&db, tenant.id, 2000.0, date(2026, 8, 2), None).await?;

        let pending = list_pending(&db).await?;
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, first.id);
        assert_eq!(pending[1].id, second.id);

        Ok(())
    }
}
