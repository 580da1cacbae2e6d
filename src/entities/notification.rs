//! Notification entity - A per-tenant message (reminder, notice, approval result).
//!
//! `kind` identifies the producer (`"rent_upcoming"`, `"rent_overdue"`,
//! `"notice"`, `"payment_approved"`, `"payment_rejected"`, `"maintenance"`).
//! `period` holds the `"YYYY-MM"` billing month for rent reminders so a scan
//! can deduplicate per tenant, kind, and month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Unique identifier for the notification
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the tenant being notified
    pub tenant_id: i64,
    /// Producer tag used for filtering and deduplication
    pub kind: String,
    /// Billing month `"YYYY-MM"` for rent reminders, None otherwise
    pub period: Option<String>,
    /// Message shown to the tenant
    pub message: String,
    /// When the notification was created
    pub created_at: DateTimeUtc,
    /// Whether the tenant has read it
    pub is_read: bool,
}

/// Defines relationships between Notification and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each notification belongs to one tenant
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id"
    )]
    Tenant,
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
