//! Unified error type for `EstateFlow`.
//!
//! All fallible operations in the crate return [`Result`], and every failure mode
//! is a variant of [`Error`]. Validation failures carry enough context to produce
//! a user-facing message without further lookups.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading or parsing configuration
        message: String,
    },

    /// Input failed a business-rule validation check
    #[error("Validation error: {message}")]
    Validation {
        /// Which check failed and why
        message: String,
    },

    /// A money or meter amount was zero, negative, or non-finite where disallowed
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// No room matched the given id or number
    #[error("Room not found: {room}")]
    RoomNotFound {
        /// Room id or number used for the lookup
        room: String,
    },

    /// No tenant matched the given id or username
    #[error("Tenant not found: {tenant}")]
    TenantNotFound {
        /// Tenant id or username used for the lookup
        tenant: String,
    },

    /// A record of some other entity was missing
    #[error("{entity} not found: {id}")]
    RecordNotFound {
        /// Entity kind, e.g. `"payment"` or `"pending approval"`
        entity: &'static str,
        /// Primary key used for the lookup
        id: i64,
    },

    /// A tenant could not be placed because the room is full
    #[error("Room {room} is at capacity ({capacity})")]
    RoomAtCapacity {
        /// Room number
        room: String,
        /// Configured capacity of the room
        capacity: i32,
    },

    /// An electricity reading was applied a second time
    #[error("Electricity reading {reading_id} has already been applied")]
    ReadingAlreadyApplied {
        /// Primary key of the reading
        reading_id: i64,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
