//! Pending-approval entity - A tenant-submitted payment proof.
//!
//! Rows here are not payments yet: the owner either approves one (which
//! records a real payment and deletes this row) or rejects it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pending-approval database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pending_approvals")]
pub struct Model {
    /// Unique identifier for the submission
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the tenant claiming the payment
    pub tenant_id: i64,
    /// Claimed amount in rupees
    pub amount: f64,
    /// Date the tenant says the payment was made
    pub payment_date: Date,
    /// Optional URL of the uploaded payment screenshot
    pub screenshot_url: Option<String>,
    /// When the proof was submitted
    pub submitted_at: DateTimeUtc,
}

/// Defines relationships between `PendingApproval` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each submission belongs to one tenant
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
