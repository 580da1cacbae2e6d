/// Database configuration and connection management
pub mod database;

/// Application settings loading from config.toml (seed rooms, reminder tuning)
pub mod settings;
