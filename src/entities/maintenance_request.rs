//! Maintenance-request entity - A tenant-raised issue with a simple status lifecycle.
//!
//! Status is stored as a string (`"pending"`, `"in_progress"`, `"resolved"`);
//! the typed view lives in `core::maintenance::RequestStatus`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maintenance-request database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_requests")]
pub struct Model {
    /// Unique identifier for the request
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the tenant who raised the request
    pub tenant_id: i64,
    /// Issue category (e.g., "plumbing", "electrical", "other")
    pub category: String,
    /// Free-form description of the problem
    pub description: String,
    /// Current status: `"pending"`, `"in_progress"`, or `"resolved"`
    pub status: String,
    /// When the request was raised
    pub created_at: DateTimeUtc,
    /// When the request last changed status
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `MaintenanceRequest` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each request belongs to one tenant
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
