//! Maintenance business logic - Tenant-filed repair requests.
//!
//! Requests move through pending -> in_progress -> resolved; each status
//! change notifies the tenant who filed the request.

use crate::{
    core::notification,
    entities::{MaintenanceRequest, Tenant, maintenance_request},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::fmt;

/// Lifecycle status of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// Filed, not yet looked at
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Resolved,
}

impl RequestStatus {
    /// Stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Resolved => "resolved",
        }
    }

    /// Parses the stored string form back into a status.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "pending" => Ok(RequestStatus::Pending),
            "in_progress" => Ok(RequestStatus::InProgress),
            "resolved" => Ok(RequestStatus::Resolved),
            other => Err(Error::Validation {
                message: format!("Unknown maintenance status: {other}"),
            }),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Files a new maintenance request, starting in `pending`.
pub async fn create_request(
    db: &DatabaseConnection,
    tenant_id: i64,
    category: String,
    description: String,
) -> Result<maintenance_request::Model> {
    if description.trim().is_empty() {
        return Err(Error::Validation {
            message: "Maintenance description cannot be empty".to_string(),
        });
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

    let category = if category.trim().is_empty() {
        "general".to_string()
    } else {
        category.trim().to_string()
    };
    let now = chrono::Utc::now();

    let model = maintenance_request::ActiveModel {
        tenant_id: Set(tenant_id),
        category: Set(category),
        description: Set(description.trim().to_string()),
        status: Set(RequestStatus::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Moves a request to a new status and notifies the tenant.
pub async fn update_status(
    db: &DatabaseConnection,
    request_id: i64,
    status: RequestStatus,
) -> Result<maintenance_request::Model> {
    let txn = db.begin().await?;

    let request = MaintenanceRequest::find_by_id(request_id)
        .one(&txn)
        .await?
        .ok_or(Error::RecordNotFound {
            entity: "maintenance request",
            id: request_id,
        })?;

    let tenant_id = request.tenant_id;
    let category = request.category.clone();

    let mut active: maintenance_request::ActiveModel = request.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(&txn).await?;

    notification::create_notification(
        &txn,
        tenant_id,
        notification::KIND_MAINTENANCE,
        None,
        format!("Your {category} request is now {status}"),
    )
    .await?;

    txn.commit().await?;
    Ok(updated)
}

/// Retrieves a tenant's requests, newest first.
pub async fn get_requests_for_tenant(
    db: &DatabaseConnection,
    tenant_id: i64,
) -> Result<Vec<maintenance_request::Model>> {
    MaintenanceRequest::find()
        .filter(maintenance_request::Column::TenantId.eq(tenant_id))
        .order_by_desc(maintenance_request::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all requests in a given status, oldest first.
pub async fn get_requests_by_status(
    db: &DatabaseConnection,
    status: RequestStatus,
) -> Result<Vec<maintenance_request::Model>> {
    MaintenanceRequest::find()
        .filter(maintenance_request::Column::Status.eq(status.as_str()))
        .order_by_asc(maintenance_request::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::InProgress,
            RequestStatus::Resolved,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(RequestStatus::parse("done").is_err());
    }

    #[tokio::test]
    async fn test_create_request_validation() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let result = create_request(&db, tenant.id, "plumbing".to_string(), "  ".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result =
            create_request(&db, 999, "plumbing".to_string(), "Leaky tap".to_string()).await;
        assert!(matches!(result, Err(Error::TenantNotFound { tenant: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_request_starts_pending() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let request =
            create_request(&db, tenant.id, "  plumbing ".to_string(), "Leaky tap".to_string())
                .await?;
        assert_eq!(request.status, "pending");
        assert_eq!(request.category, "plumbing");
        assert_eq!(request.description, "Leaky tap");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_category_defaults_to_general() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let request =
            create_request(&db, tenant.id, String::new(), "Broken latch".to_string()).await?;
        assert_eq!(request.category, "general");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_notifies_tenant() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let request =
            create_request(&db, tenant.id, "plumbing".to_string(), "Leaky tap".to_string())
                .await?;
        let updated = update_status(&db, request.id, RequestStatus::InProgress).await?;
        assert_eq!(updated.status, "in_progress");

        let notifications =
            notification::get_notifications_for_tenant(&db, tenant.id, false).await?;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, notification::KIND_MAINTENANCE);
        assert!(notifications[0].message.contains("in_progress"));

        let result = update_status(&db, 999, RequestStatus::Resolved).await;
        assert!(matches!(result, Err(Error::RecordNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_requests_by_status() -> Result<()> {
        let (db, _room, tenant) = setup_with_tenant().await?;

        let first =
            create_request(&db, tenant.id, "plumbing".to_string(), "Leaky tap".to_string())
                .await?;
        let second =
            create_request(&db, tenant.id, "electrical".to_string(), "Dead socket".to_string())
                .await?;
        update_status(&db, first.id, RequestStatus::Resolved).await?;

        let pending = get_requests_by_status(&db, RequestStatus::Pending).await?;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second.id);

        let resolved = get_requests_by_status(&db, RequestStatus::Resolved).await?;
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, first.id);

        assert_eq!(get_requests_for_tenant(&db, tenant.id).await?.len(), 2);

        Ok(())
    }
}
