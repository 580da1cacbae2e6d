//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod electricity_reading;
pub mod expense;
pub mod maintenance_request;
pub mod notice;
pub mod notification;
pub mod other_charge;
pub mod payment;
pub mod pending_approval;
pub mod room;
pub mod system_state;
pub mod tenant;

// Re-export specific types to avoid conflicts
pub use electricity_reading::{
    Column as ElectricityReadingColumn, Entity as ElectricityReading,
    Model as ElectricityReadingModel,
};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use maintenance_request::{
    Column as MaintenanceRequestColumn, Entity as MaintenanceRequest,
    Model as MaintenanceRequestModel,
};
pub use notice::{Column as NoticeColumn, Entity as Notice, Model as NoticeModel};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use other_charge::{Column as OtherChargeColumn, Entity as OtherCharge, Model as OtherChargeModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use pending_approval::{
    Column as PendingApprovalColumn, Entity as PendingApproval, Model as PendingApprovalModel,
};
pub use room::{Column as RoomColumn, Entity as Room, Model as RoomModel};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
pub use tenant::{Column as TenantColumn, Entity as Tenant, Model as TenantModel};
