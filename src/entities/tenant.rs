//! Tenant entity - Represents an occupant renting a bed in a room.
//!
//! Each tenant carries their per-person rent share (`rent_amount`), which is
//! recomputed whenever the occupancy of their room changes, plus lease dates
//! and contact details. Tenants are deactivated on vacating rather than
//! removed, so their payment history survives.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tenant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    /// Unique identifier for the tenant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name of the tenant
    pub name: String,
    /// 10-digit contact phone number
    pub phone: String,
    /// Login/display handle, unique per tenant
    #[sea_orm(unique)]
    pub username: String,
    /// ID of the room the tenant occupies
    pub room_id: i64,
    /// Per-person monthly rent share in rupees
    pub rent_amount: f64,
    /// Day of month (1-28) the rent falls due
    pub due_day: i32,
    /// First day of the lease
    pub lease_start: Date,
    /// Last day of the lease, None while open-ended
    pub lease_end: Option<Date>,
    /// Optional 12-digit Aadhaar number
    pub aadhaar: Option<String>,
    /// Whether the tenant currently occupies the room
    pub is_active: bool,
}

/// Defines relationships between Tenant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each tenant belongs to one room
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    /// One tenant has many recorded payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    /// One tenant accumulates many ad hoc charges
    #[sea_orm(has_many = "super::other_charge::Entity")]
    OtherCharges,
    /// One tenant may have several payment proofs awaiting approval
    #[sea_orm(has_many = "super::pending_approval::Entity")]
    PendingApprovals,
    /// One tenant raises many maintenance requests
    #[sea_orm(has_many = "super::maintenance_request::Entity")]
    MaintenanceRequests,
    /// One tenant receives many notifications
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::other_charge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OtherCharges.def()
    }
}

impl Related<super::pending_approval::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PendingApprovals.def()
    }
}

impl Related<super::maintenance_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaintenanceRequests.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
