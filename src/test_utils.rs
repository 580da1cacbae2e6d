//! Shared test utilities for `EstateFlow`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{payment, room, tenant},
    entities::{self, other_charge},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test room with sensible defaults.
///
/// # Defaults
/// * `capacity`: 2
/// * `rent`: 8000.0
pub async fn create_test_room(
    db: &DatabaseConnection,
    number: &str,
) -> Result<entities::room::Model> {
    room::create_room(db, number.to_string(), 2, 8000.0).await
}

/// Creates a test room with custom capacity and rent.
pub async fn create_custom_room(
    db: &DatabaseConnection,
    number: &str,
    capacity: i32,
    rent: f64,
) -> Result<entities::room::Model> {
    room::create_room(db, number.to_string(), capacity, rent).await
}

/// Creates a test tenant with sensible defaults.
///
/// # Defaults
/// * `phone`: "9876543210"
/// * `username`: the lowercased name
/// * `due_day`: 5
/// * `lease_start`: 2026-01-01
/// * `aadhaar`: None
pub async fn create_test_tenant(
    db: &DatabaseConnection,
    name: &str,
    room_id: i64,
) -> Result<entities::tenant::Model> {
    tenant::create_tenant(
        db,
        name.to_string(),
        "9876543210".to_string(),
        name.to_lowercase(),
        room_id,
        5,
        NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
        None,
    )
    .await
}

/// Creates a test tenant with custom parameters.
/// Use this when the test cares about the username, due day, or lease dates.
pub async fn create_custom_tenant(
    db: &DatabaseConnection,
    name: &str,
    username: &str,
    room_id: i64,
    due_day: i32,
    lease_start: NaiveDate,
    aadhaar: Option<String>,
) -> Result<entities::tenant::Model> {
    tenant::create_tenant(
        db,
        name.to_string(),
        "9876543210".to_string(),
        username.to_string(),
        room_id,
        due_day,
        lease_start,
        aadhaar,
    )
    .await
}

/// Records a test payment.
///
/// # Defaults
/// * `method`: "upi"
pub async fn create_test_payment(
    db: &DatabaseConnection,
    tenant_id: i64,
    amount: f64,
    payment_date: NaiveDate,
) -> Result<entities::payment::Model> {
    payment::record_payment(db, tenant_id, amount, payment_date, "upi".to_string()).await
}

/// Inserts an ad hoc charge directly, bypassing the electricity flow.
///
/// # Defaults
/// * `description`: `"Test charge"`
pub async fn create_test_charge(
    db: &DatabaseConnection,
    tenant_id: i64,
    amount: f64,
    charge_date: NaiveDate,
) -> Result<entities::other_charge::Model> {
    let model = other_charge::ActiveModel {
        tenant_id: Set(tenant_id),
        description: Set("Test charge".to_string()),
        amount: Set(amount),
        charge_date: Set(charge_date),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with one room.
/// Returns (db, room) for common test scenarios.
pub async fn setup_with_room() -> Result<(DatabaseConnection, entities::room::Model)> {
    let db = setup_test_db().await?;
    let room = create_test_room(&db, "101").await?;
    Ok((db, room))
}

/// Sets up a complete test environment with one room and one tenant.
/// Returns (db, room, tenant) for tenant-related tests.
pub async fn setup_with_tenant() -> Result<(
    DatabaseConnection,
    entities::room::Model,
    entities::tenant::Model,
)> {
    let db = setup_test_db().await?;
    let room = create_test_room(&db, "101").await?;
    let tenant = create_test_tenant(&db, "Alice", room.id).await?;
    Ok((db, room, tenant))
}
