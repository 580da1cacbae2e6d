//! Electricity-reading entity - A meter reading for one room.
//!
//! `total_amount` is fixed at recording time from the consumed units and the
//! rate. Applying a reading fans the total out as one `other_charge` per
//! active occupant and flips `applied`; an applied reading is immutable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Electricity-reading database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "electricity_readings")]
pub struct Model {
    /// Unique identifier for the reading
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the room the meter belongs to
    pub room_id: i64,
    /// Meter value at the previous reading
    pub previous_reading: f64,
    /// Meter value at this reading; never below `previous_reading`
    pub current_reading: f64,
    /// Billing rate per consumed unit in rupees
    pub rate_per_unit: f64,
    /// Total bill: `(current - previous) * rate`, rounded to paise
    pub total_amount: f64,
    /// Date the meter was read
    pub reading_date: Date,
    /// Whether the bill has been pushed out as per-occupant charges
    pub applied: bool,
}

/// Defines relationships between `ElectricityReading` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reading belongs to one room
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
