//! Database configuration module for `EstateFlow`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{
    ElectricityReading, Expense, MaintenanceRequest, Notice, Notification, OtherCharge, Payment,
    PendingApproval, Room, SystemState, Tenant,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/estateflow.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Room),
        schema.create_table_from_entity(Tenant),
        schema.create_table_from_entity(OtherCharge),
        schema.create_table_from_entity(Payment),
        schema.create_table_from_entity(PendingApproval),
        schema.create_table_from_entity(ElectricityReading),
        schema.create_table_from_entity(Expense),
        schema.create_table_from_entity(MaintenanceRequest),
        schema.create_table_from_entity(Notice),
        schema.create_table_from_entity(Notification),
        schema.create_table_from_entity(SystemState),
    ];

    // Idempotent so the daemon can start against an existing database file
    for statement in &mut statements {
        db.execute(builder.build(statement.if_not_exists())).await?;
    }

    Ok(())
}
