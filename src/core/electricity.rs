//! Electricity business logic - Meter readings and per-occupant billing.
//!
//! Recording a reading fixes the total from the consumed units and rate.
//! Applying a reading fans the total out as one ad hoc charge per active
//! occupant of the room, with the shares summing exactly to the total.
//! A reading can only ever be applied once.

use crate::{
    core::{
        billing::{billing_month_of, month_key, round_to_paise},
        room as room_ops,
    },
    entities::{ElectricityReading, Room, electricity_reading, other_charge},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Records a meter reading for a room and computes its total bill.
///
/// Rejects meters that run backwards (`current < previous`, i.e. negative
/// units) and non-positive rates.
pub async fn record_reading(
    db: &DatabaseConnection,
    room_id: i64,
    previous_reading: f64,
    current_reading: f64,
    rate_per_unit: f64,
    reading_date: NaiveDate,
) -> Result<electricity_reading::Model> {
    if Room::find_by_id(room_id).one(db).await?.is_none() {
        return Err(Error::RoomNotFound {
            room: room_id.to_string(),
        });
    }
    if previous_reading < 0.0 || !previous_reading.is_finite() || !current_reading.is_finite() {
        return Err(Error::Validation {
            message: "Meter readings must be non-negative numbers".to_string(),
        });
    }
    if current_reading < previous_reading {
        return Err(Error::Validation {
            message: format!(
                "Current reading {current_reading} is below previous reading {previous_reading}"
            ),
        });
    }
    if rate_per_unit <= 0.0 || !rate_per_unit.is_finite() {
        return Err(Error::InvalidAmount {
            amount: rate_per_unit,
        });
    }

    let units = current_reading - previous_reading;
    let total_amount = round_to_paise(units * rate_per_unit);

    let model = electricity_reading::ActiveModel {
        room_id: Set(room_id),
        previous_reading: Set(previous_reading),
        current_reading: Set(current_reading),
        rate_per_unit: Set(rate_per_unit),
        total_amount: Set(total_amount),
        reading_date: Set(reading_date),
        applied: Set(false),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Applies a reading: bills each active occupant their share of the total.
///
/// Creates one `other_charge` per occupant dated on the reading date, then
/// marks the reading applied. Refuses readings already applied and rooms
/// with no active occupants. Returns the created charges.
pub async fn apply_reading(
    db: &DatabaseConnection,
    reading_id: i64,
) -> Result<Vec<other_charge::Model>> {
    let txn = db.begin().await?;

    let reading = ElectricityReading::find_by_id(reading_id)
        .one(&txn)
        .await?
        .ok_or(Error::RecordNotFound {
            entity: "electricity reading",
            id: reading_id,
        })?;

    if reading.applied {
        return Err(Error::ReadingAlreadyApplied { reading_id });
    }

    let occupants = room_ops::active_occupants(&txn, reading.room_id).await?;
    if occupants.is_empty() {
        return Err(Error::Validation {
            message: "Cannot apply an electricity bill to a room with no active occupants"
                .to_string(),
        });
    }

    let shares = room_ops::split_shares(reading.total_amount, occupants.len());
    let (year, month) = billing_month_of(reading.reading_date);
    let description = format!("Electricity {}", month_key(year, month));

    let mut charges = Vec::with_capacity(occupants.len());
    for (occupant, share) in occupants.iter().zip(shares) {
        let charge = other_charge::ActiveModel {
            tenant_id: Set(occupant.id),
            description: Set(description.clone()),
            amount: Set(share),
            charge_date: Set(reading.reading_date),
            ..Default::default()
        };
        charges.push(charge.insert(&txn).await?);
    }

    let mut active: electricity_reading::ActiveModel = reading.into();
    active.applied = Set(true);
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(charges)
}

/// Retrieves all readings for a room, newest first.
pub async fn get_readings_for_room(
    db: &DatabaseConnection,
    room_id: i64,
) -> Result<Vec<electricity_reading::Model>> {
    ElectricityReading::find()
        .filter(electricity_reading::Column::RoomId.eq(room_id))
        .order_by_desc(electricity_reading::Column::ReadingDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all readings not yet applied, across all rooms.
pub async fn get_unapplied_readings(
    db: &DatabaseConnection,
) -> Result<Vec<electricity_reading::Model>> {
    ElectricityReading::find()
        .filter(electricity_reading::Column::Applied.eq(false))
        .order_by_asc(electricity_reading::Column::ReadingDate)
        .all(db)
        .await
        .map_err(Into::into)
}
