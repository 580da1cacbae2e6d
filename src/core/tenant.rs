//! Tenant business logic - Handles the tenant lifecycle.
//!
//! Placing, moving, vacating, and deleting a tenant all change room occupancy,
//! so each of these runs in a transaction that finishes with a rent re-split
//! of the affected room(s). Deleting a tenant also removes every record that
//! references them.

use crate::{
    core::room as room_ops,
    entities::{
        MaintenanceRequest, Notification, OtherCharge, Payment, PendingApproval, Room, Tenant,
        maintenance_request, notification, other_charge, payment, pending_approval, tenant,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

fn validate_phone(phone: &str) -> Result<()> {
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation {
            message: format!("Phone number must be 10 digits, got \"{phone}\""),
        });
    }
    Ok(())
}

fn validate_aadhaar(aadhaar: &str) -> Result<()> {
    if aadhaar.len() != 12 || !aadhaar.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation {
            message: "Aadhaar number must be 12 digits".to_string(),
        });
    }
    Ok(())
}

/// Finds a tenant by their unique ID.
pub async fn get_tenant_by_id(
    db: &DatabaseConnection,
    tenant_id: i64,
) -> Result<Option<tenant::Model>> {
    Tenant::find_by_id(tenant_id).one(db).await.map_err(Into::into)
}

/// Finds a tenant by their username.
pub async fn get_tenant_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<tenant::Model>> {
    Tenant::find()
        .filter(tenant::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every tenant, active or not, ordered alphabetically by name.
pub async fn get_all_tenants(db: &DatabaseConnection) -> Result<Vec<tenant::Model>> {
    Tenant::find()
        .order_by_asc(tenant::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all active tenants, ordered alphabetically by name.
pub async fn get_active_tenants(db: &DatabaseConnection) -> Result<Vec<tenant::Model>> {
    Tenant::find()
        .filter(tenant::Column::IsActive.eq(true))
        .order_by_asc(tenant::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every tenant ever placed in a room, active or not.
pub async fn get_tenants_in_room(
    db: &DatabaseConnection,
    room_id: i64,
) -> Result<Vec<tenant::Model>> {
    Tenant::find()
        .filter(tenant::Column::RoomId.eq(room_id))
        .order_by_asc(tenant::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Places a new tenant in a room.
///
/// Validates contact details and the room's spare capacity, then inserts the
/// tenant and re-splits the room's rent so every occupant's share is current.
#[allow(clippy::too_many_arguments)]
pub async fn create_tenant(
    db: &DatabaseConnection,
    name: String,
    phone: String,
    username: String,
    room_id: i64,
    due_day: i32,
    lease_start: NaiveDate,
    aadhaar: Option<String>,
) -> Result<tenant::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Tenant name cannot be empty".to_string(),
        });
    }
    if username.trim().is_empty() {
        return Err(Error::Validation {
            message: "Username cannot be empty".to_string(),
        });
    }
    validate_phone(&phone)?;
    if let Some(number) = aadhaar.as_deref() {
        validate_aadhaar(number)?;
    }
    if !(1..=28).contains(&due_day) {
        return Err(Error::Validation {
            message: format!("Due day must be between 1 and 28, got {due_day}"),
        });
    }
    if get_tenant_by_username(db, username.trim()).await?.is_some() {
        return Err(Error::Validation {
            message: format!("Username {} is already taken", username.trim()),
        });
    }

    let txn = db.begin().await?;

    let room = Room::find_by_id(room_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            room: room_id.to_string(),
        })?;

    let occupants = room_ops::occupant_count(&txn, room_id).await?;
    // Cast safety: capacity is validated positive at room creation
    #[allow(clippy::cast_sign_loss)]
    if occupants >= room.capacity as u64 {
        return Err(Error::RoomAtCapacity {
            room: room.number,
            capacity: room.capacity,
        });
    }

    let model = tenant::ActiveModel {
        name: Set(name.trim().to_string()),
        phone: Set(phone),
        username: Set(username.trim().to_string()),
        room_id: Set(room_id),
        rent_amount: Set(0.0),
        due_day: Set(due_day),
        lease_start: Set(lease_start),
        lease_end: Set(None),
        aadhaar: Set(aadhaar),
        is_active: Set(true),
        ..Default::default()
    };

    let inserted = model.insert(&txn).await?;
    room_ops::resplit_room_rent(&txn, room_id).await?;

    txn.commit().await?;

    // Re-fetch so the returned model carries the freshly split rent share
    get_tenant_by_id(db, inserted.id)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: inserted.id.to_string(),
        })
}

/// Updates a tenant's contact details. `None` leaves a field unchanged.
pub async fn update_contact(
    db: &DatabaseConnection,
    tenant_id: i64,
    name: Option<String>,
    phone: Option<String>,
) -> Result<tenant::Model> {
    let tenant = get_tenant_by_id(db, tenant_id)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        })?;

    let mut active: tenant::ActiveModel = tenant.into();
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Tenant name cannot be empty".to_string(),
            });
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(phone) = phone {
        validate_phone(&phone)?;
        active.phone = Set(phone);
    }

    active.update(db).await.map_err(Into::into)
}

/// Moves a tenant to another room and re-splits the rent of both rooms.
pub async fn move_tenant(
    db: &DatabaseConnection,
    tenant_id: i64,
    new_room_id: i64,
) -> Result<tenant::Model> {
    let txn = db.begin().await?;

    let tenant = Tenant::find_by_id(tenant_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        })?;
    let old_room_id = tenant.room_id;

    if old_room_id == new_room_id {
        return Err(Error::Validation {
            message: "Tenant already occupies that room".to_string(),
        });
    }

    let new_room = Room::find_by_id(new_room_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            room: new_room_id.to_string(),
        })?;

    let occupants = room_ops::occupant_count(&txn, new_room_id).await?;
    #[allow(clippy::cast_sign_loss)]
    if occupants >= new_room.capacity as u64 {
        return Err(Error::RoomAtCapacity {
            room: new_room.number,
            capacity: new_room.capacity,
        });
    }

    let mut active: tenant::ActiveModel = tenant.into();
    active.room_id = Set(new_room_id);
    active.update(&txn).await?;

    room_ops::resplit_room_rent(&txn, old_room_id).await?;
    room_ops::resplit_room_rent(&txn, new_room_id).await?;

    txn.commit().await?;

    get_tenant_by_id(db, tenant_id)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        })
}

/// Marks a tenant as vacated: deactivates them, closes the lease, and
/// re-splits the room's rent among the remaining occupants. History is kept.
pub async fn vacate_tenant(
    db: &DatabaseConnection,
    tenant_id: i64,
    lease_end: NaiveDate,
) -> Result<tenant::Model> {
    let txn = db.begin().await?;

    let tenant = Tenant::find_by_id(tenant_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        })?;
    let room_id = tenant.room_id;

    let mut active: tenant::ActiveModel = tenant.into();
    active.is_active = Set(false);
    active.lease_end = Set(Some(lease_end));
    active.update(&txn).await?;

    room_ops::resplit_room_rent(&txn, room_id).await?;

    txn.commit().await?;

    get_tenant_by_id(db, tenant_id)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        })
}

/// Permanently deletes a tenant and everything that references them, then
/// re-splits the room's rent among the remaining occupants.
pub async fn delete_tenant(db: &DatabaseConnection, tenant_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let tenant = Tenant::find_by_id(tenant_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::TenantNotFound {
            tenant: tenant_id.to_string(),
        })?;
    let room_id = tenant.room_id;

    Payment::delete_many()
        .filter(payment::Column::TenantId.eq(tenant_id))
        .exec(&txn)
        .await?;
    OtherCharge::delete_many()
        .filter(other_charge::Column::TenantId.eq(tenant_id))
        .exec(&txn)
        .await?;
    PendingApproval::delete_many()
        .filter(pending_approval::Column::TenantId.eq(tenant_id))
        .exec(&txn)
        .await?;
    MaintenanceRequest::delete_many()
        .filter(maintenance_request::Column::TenantId.eq(tenant_id))
        .exec(&txn)
        .await?;
    Notification::delete_many()
        .filter(notification::Column::TenantId.eq(tenant_id))
        .exec(&txn)
        .await?;
    Tenant::delete_by_id(tenant_id).exec(&txn).await?;

    room_ops::resplit_room_rent(&txn, room_id).await?;

    txn.commit().await?;
    Ok(())
}
