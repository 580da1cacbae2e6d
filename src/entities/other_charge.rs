//! Other-charge entity - Ad hoc amounts billed to a tenant on top of rent.
//!
//! Electricity shares are the main producer of these rows; one row is created
//! per occupant when a reading is applied. Charges count toward the month of
//! their `charge_date` when computing a tenant's statement.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Other-charge database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "other_charges")]
pub struct Model {
    /// Unique identifier for the charge
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the tenant being billed
    pub tenant_id: i64,
    /// What the charge is for (e.g., "Electricity 2026-08")
    pub description: String,
    /// Charge amount in rupees
    pub amount: f64,
    /// Date the charge was incurred; determines its billing month
    pub charge_date: Date,
}

/// Defines relationships between `OtherCharge` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each charge belongs to one tenant
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
