//! Room business logic - Handles rooms, occupancy, and rent splitting.
//!
//! A room's total rent is divided evenly among its active occupants. Every
//! occupancy change goes through [`resplit_room_rent`] so the per-person
//! shares always sum back to the room's rent.

use crate::{
    config::settings::RoomConfig,
    core::billing::round_to_paise,
    entities::{Room, Tenant, room, tenant},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Retrieves all rooms, ordered by room number.
pub async fn get_all_rooms(db: &DatabaseConnection) -> Result<Vec<room::Model>> {
    Room::find()
        .order_by_asc(room::Column::Number)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a room by its unique ID.
pub async fn get_room_by_id(db: &DatabaseConnection, room_id: i64) -> Result<Option<room::Model>> {
    Room::find_by_id(room_id).one(db).await.map_err(Into::into)
}

/// Finds a room by its number label.
pub async fn get_room_by_number(
    db: &DatabaseConnection,
    number: &str,
) -> Result<Option<room::Model>> {
    Room::find()
        .filter(room::Column::Number.eq(number))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new room, validating its number, capacity, and rent.
pub async fn create_room(
    db: &DatabaseConnection,
    number: String,
    capacity: i32,
    rent: f64,
) -> Result<room::Model> {
    if number.trim().is_empty() {
        return Err(Error::Validation {
            message: "Room number cannot be empty".to_string(),
        });
    }
    if capacity < 1 {
        return Err(Error::Validation {
            message: format!("Room capacity must be at least 1, got {capacity}"),
        });
    }
    if rent < 0.0 || !rent.is_finite() {
        return Err(Error::InvalidAmount { amount: rent });
    }
    if get_room_by_number(db, number.trim()).await?.is_some() {
        return Err(Error::Validation {
            message: format!("Room {} already exists", number.trim()),
        });
    }

    let room = room::ActiveModel {
        number: Set(number.trim().to_string()),
        capacity: Set(capacity),
        rent: Set(rent),
        ..Default::default()
    };

    let result = room.insert(db).await?;
    Ok(result)
}

/// Changes a room's total rent and re-splits the shares of its occupants.
pub async fn update_room_rent(
    db: &DatabaseConnection,
    room_id: i64,
    new_rent: f64,
) -> Result<room::Model> {
    if new_rent < 0.0 || !new_rent.is_finite() {
        return Err(Error::InvalidAmount { amount: new_rent });
    }

    let txn = db.begin().await?;

    let room = Room::find_by_id(room_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            room: room_id.to_string(),
        })?;

    let mut active: room::ActiveModel = room.into();
    active.rent = Set(new_rent);
    active.update(&txn).await?;

    resplit_room_rent(&txn, room_id).await?;

    txn.commit().await?;

    Room::find_by_id(room_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            room: room_id.to_string(),
        })
}

/// Deletes a room. Refused while any active tenant occupies it.
pub async fn delete_room(db: &DatabaseConnection, room_id: i64) -> Result<()> {
    let room = Room::find_by_id(room_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            room: room_id.to_string(),
        })?;

    let occupants = active_occupants(db, room_id).await?;
    if !occupants.is_empty() {
        return Err(Error::Validation {
            message: format!(
                "Room {} still has {} active tenant(s)",
                room.number,
                occupants.len()
            ),
        });
    }

    Room::delete_by_id(room_id).exec(db).await?;
    Ok(())
}

/// Retrieves the active tenants of a room, ordered by ID (placement order).
pub async fn active_occupants<C>(db: &C, room_id: i64) -> Result<Vec<tenant::Model>>
where
    C: ConnectionTrait,
{
    Tenant::find()
        .filter(tenant::Column::RoomId.eq(room_id))
        .filter(tenant::Column::IsActive.eq(true))
        .order_by_asc(tenant::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts the active tenants of a room without fetching them.
pub async fn occupant_count<C>(db: &C, room_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    Tenant::find()
        .filter(tenant::Column::RoomId.eq(room_id))
        .filter(tenant::Column::IsActive.eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Splits a total evenly into `count` paise-rounded shares.
///
/// The last share absorbs the rounding remainder, so the shares always sum
/// back to `total`. An empty split is returned for zero occupants.
#[must_use]
pub fn split_shares(total: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    // Cast safety: occupant counts are tiny, well within f64 precision
    #[allow(clippy::cast_precision_loss)]
    let base = round_to_paise(total / count as f64);
    let mut shares = vec![base; count];
    #[allow(clippy::cast_precision_loss)]
    let last = round_to_paise(base.mul_add(-((count - 1) as f64), total));
    shares[count - 1] = last;
    shares
}

/// Recomputes and persists the per-person rent share of each active occupant.
///
/// Callable inside a transaction; every occupancy or rent change must pass
/// through here so the shares stay consistent with the room's total.
pub async fn resplit_room_rent<C>(db: &C, room_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let room = Room::find_by_id(room_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            room: room_id.to_string(),
        })?;

    let occupants = active_occupants(db, room_id).await?;
    let shares = split_shares(room.rent, occupants.len());

    for (occupant, share) in occupants.into_iter().zip(shares) {
        let mut active: tenant::ActiveModel = occupant.into();
        active.rent_amount = Set(share);
        active.update(db).await?;
    }

    Ok(())
}

/// Inserts config-defined rooms that are not present yet, matched by number.
///
/// Returns the number of rooms inserted. Existing rooms are left untouched.
pub async fn seed_initial_rooms(db: &DatabaseConnection, rooms: &[RoomConfig]) -> Result<usize> {
    let mut inserted = 0;
    for config in rooms {
        if get_room_by_number(db, &config.number).await?.is_some() {
            continue;
        }
        create_room(db, config.number.clone(), config.capacity, config.rent).await?;
        info!(number = %config.number, "Seeded room from config");
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_split_shares_even() {
        assert_eq!(split_shares(8000.0, 2), vec![4000.0, 4000.0]);
        assert_eq!(split_shares(9000.0, 3), vec![3000.0, 3000.0, 3000.0]);
    }

    #[test]
    fn test_split_shares_remainder_goes_to_last() {
        let shares = split_shares(100.0, 3);
        assert_eq!(shares, vec![33.33, 33.33, 33.34]);
    }

    #[test]
    fn test_split_shares_sum_back_to_total() {
        for count in 1..=7 {
            let shares = split_shares(10000.0, count);
            assert_eq!(shares.len(), count);
            let sum: f64 = shares.iter().sum();
            assert!((sum - 10000.0).abs() < 1e-6);
        }
        let odd = split_shares(7501.55, 4);
        let sum: f64 = odd.iter().sum();
        assert!((sum - 7501.55).abs() < 1e-6);
    }

    #[test]
    fn test_split_shares_empty() {
        assert!(split_shares(8000.0, 0).is_empty());
    }

    #[tokio::test]
    async fn test_create_room_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_room(&db, String::new(), 2, 8000.0).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result = create_room(&db, "101".to_string(), 0, 8000.0).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result = create_room(&db, "101".to_string(), 2, -1.0).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_room_duplicate_number() -> Result<()> {
        let db = setup_test_db().await?;

        create_room(&db, "101".to_string(), 2, 8000.0).await?;
        let result = create_room(&db, "101".to_string(), 3, 9000.0).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_room_by_number() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_room(&db, "G-2".to_string(), 1, 6000.0).await?;
        let found = get_room_by_number(&db, "G-2").await?;
        assert_eq!(found.unwrap().id, created.id);

        assert!(get_room_by_number(&db, "missing").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_occupant_count_tracks_occupancy() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_custom_room(&db, "101", 2, 8000.0).await?;
        assert_eq!(occupant_count(&db, room.id).await?, 0);

        create_test_tenant(&db, "Alice", room.id).await?;
        let bob = create_test_tenant(&db, "Bob", room.id).await?;
        assert_eq!(occupant_count(&db, room.id).await?, 2);

        // Vacated tenants no longer count
        let lease_end = chrono::NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        crate::core::tenant::vacate_tenant(&db, bob.id, lease_end).await?;
        assert_eq!(occupant_count(&db, room.id).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_room_rent_resplits() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_custom_room(&db, "101", 2, 8000.0).await?;
        let alice = create_test_tenant(&db, "Alice", room.id).await?;
        let bob = create_test_tenant(&db, "Bob", room.id).await?;

        update_room_rent(&db, room.id, 9000.0).await?;

        let alice = Tenant::find_by_id(alice.id).one(&db).await?.unwrap();
        let bob = Tenant::find_by_id(bob.id).one(&db).await?.unwrap();
        assert_eq!(alice.rent_amount, 4500.0);
        assert_eq!(bob.rent_amount, 4500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_room_refused_while_occupied() -> Result<()> {
        let (db, room, _tenant) = setup_with_tenant().await?;

        let result = delete_room(&db, room.id).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_vacant_room() -> Result<()> {
        let (db, room) = setup_with_room().await?;

        delete_room(&db, room.id).await?;
        assert!(get_room_by_id(&db, room.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_initial_rooms_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let configs = vec![
            RoomConfig {
                number: "101".to_string(),
                capacity: 2,
                rent: 8000.0,
            },
            RoomConfig {
                number: "102".to_string(),
                capacity: 3,
                rent: 10500.0,
            },
        ];

        let inserted = seed_initial_rooms(&db, &configs).await?;
        assert_eq!(inserted, 2);

        // A second pass inserts nothing
        let inserted = seed_initial_rooms(&db, &configs).await?;
        assert_eq!(inserted, 0);
        assert_eq!(get_all_rooms(&db).await?.len(), 2);

        Ok(())
    }
}
