//! Notification business logic - Per-tenant messages.
//!
//! Producers tag each notification with a `kind`; rent reminders additionally
//! carry the billing month in `period` so the reminder scan can check whether
//! a tenant was already reminded for that month.

use crate::{
    entities::{Notification, notification},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};

/// Kind tag for an upcoming-rent reminder.
pub const KIND_RENT_UPCOMING: &str = "rent_upcoming";
/// Kind tag for an overdue-rent reminder.
pub const KIND_RENT_OVERDUE: &str = "rent_overdue";
/// Kind tag for a broadcast notice.
pub const KIND_NOTICE: &str = "notice";
/// Kind tag for an approved payment proof.
pub const KIND_PAYMENT_APPROVED: &str = "payment_approved";
/// Kind tag for a rejected payment proof.
pub const KIND_PAYMENT_REJECTED: &str = "payment_rejected";
/// Kind tag for a maintenance status change.
pub const KIND_MAINTENANCE: &str = "maintenance";

/// Creates a notification. Callable inside a transaction.
pub async fn create_notification<C>(
    db: &C,
    tenant_id: i64,
    kind: &str,
    period: Option<String>,
    message: String,
) -> Result<notification::Model>
where
    C: ConnectionTrait,
{
    let model = notification::ActiveModel {
        tenant_id: Set(tenant_id),
        kind: Set(kind.to_string()),
        period: Set(period),
        message: Set(message),
        created_at: Set(chrono::Utc::now()),
        is_read: Set(false),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a tenant's notifications, newest first.
pub async fn get_notifications_for_tenant(
    db: &DatabaseConnection,
    tenant_id: i64,
    unread_only: bool,
) -> Result<Vec<notification::Model>> {
    let mut query = Notification::find()
        .filter(notification::Column::TenantId.eq(tenant_id))
        .order_by_desc(notification::Column::CreatedAt);
    if unread_only {
        query = query.filter(notification::Column::IsRead.eq(false));
    }
    query.all(db).await.map_err(Into::into)
}

/// Checks whether a tenant already has a notification of this kind and period.
/// Used by the reminder scan for per-month deduplication.
pub async fn has_notification<C>(
    db: &C,
    tenant_id: i64,
    kind: &str,
    period: &str,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    let count = Notification::find()
        .filter(notification::Column::TenantId.eq(tenant_id))
        .filter(notification::Column::Kind.eq(kind))
        .filter(notification::Column::Period.eq(period))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Marks one notification as read.
pub async fn mark_read(db: &DatabaseConnection, notification_id: i64) -> Result<notification::Model> {
    let notification = Notification::find_by_id(notification_id)
        .one(db)
        .await?
        .ok_or(Error::RecordNotFound {
            entity: "notification",
            id: notification_id,
        })?;

    let mut active: notification::ActiveModel = notification.into();
    active.is_read = Set(true);
    active.update(db).await.map_err(Into::into)
}

/// Marks all of a tenant's notifications as read; returns how many changed.
pub async fn mark_all_read(db: &DatabaseConnection, tenant_id: i64) -> Result<u64> {
    let result = Notification::update_many()
        .col_expr(notification::Column::IsRead, Expr::value(true))
        .filter(notification::Column::TenantId.eq(tenant_id))
        .filter(notification::Column::IsRead.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Counts a tenant's unread notifications.
pub async fn unread_count(db: &DatabaseConnection, tenant_id: i64) -> Result<u64> {
    Notification::find()
        .filter(notification::Column::TenantId.eq(tenant_id))
        .filter(notification::Column::IsRead.eq(false))
        .count(db)
        .await
        .map_err(Into::into)
}
