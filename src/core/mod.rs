//! Core business logic - framework-agnostic operations over the EstateFlow domain.
//!
//! Every rule the application enforces lives here: rent splitting, monthly
//! aggregation, payment application, electricity fan-out, reminders, and
//! insights. Modules take a database connection and return structured data;
//! nothing in here knows about any particular user interface.

/// Pending payment-proof submission, approval, and rejection
pub mod approval;
/// Monthly statement aggregation and payment-status classification
pub mod billing;
/// Electricity readings and per-occupant charge fan-out
pub mod electricity;
/// Owner-side operating expenses
pub mod expense;
/// Rule-based alerts derived from billing aggregates
pub mod insights;
/// Maintenance requests and their status lifecycle
pub mod maintenance;
/// Owner announcements broadcast to all tenants
pub mod notice;
/// Per-tenant notifications
pub mod notification;
/// Recorded payments
pub mod payment;
/// Throttled rent-reminder scan
pub mod reminder;
/// Rooms, occupancy, and rent splitting
pub mod room;
/// Tenant lifecycle
pub mod tenant;
