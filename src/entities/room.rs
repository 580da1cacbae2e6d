//! Room entity - Represents a rentable unit.
//!
//! Each room carries a total monthly rent which is divided evenly among its
//! active occupants. Capacity bounds how many tenants may be placed in it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Room database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    /// Unique identifier for the room
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable room number or label (e.g., "101", "G-2")
    #[sea_orm(unique)]
    pub number: String,
    /// Maximum number of tenants the room can hold
    pub capacity: i32,
    /// Total monthly rent for the room, split among occupants
    pub rent: f64,
}

/// Defines relationships between Room and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One room houses many tenants
    #[sea_orm(has_many = "super::tenant::Entity")]
    Tenants,
    /// One room has many electricity readings
    #[sea_orm(has_many = "super::electricity_reading::Entity")]
    ElectricityReadings,
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenants.def()
    }
}

impl Related<super::electricity_reading::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ElectricityReadings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
