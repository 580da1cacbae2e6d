//! Notice business logic - Owner broadcasts to every active tenant.

use crate::{
    core::{notification, tenant as tenant_ops},
    entities::{Notice, notice},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Posts a notice and fans it out as a notification to every active tenant.
/// The notice row and all notifications are created in one transaction.
pub async fn post_notice(
    db: &DatabaseConnection,
    title: String,
    message: String,
) -> Result<notice::Model> {
    if title.trim().is_empty() {
        return Err(Error::Validation {
            message: "Notice title cannot be empty".to_string(),
        });
    }
    if message.trim().is_empty() {
        return Err(Error::Validation {
            message: "Notice message cannot be empty".to_string(),
        });
    }

    let recipients = tenant_ops::get_active_tenants(db).await?;

    let txn = db.begin().await?;

    let model = notice::ActiveModel {
        title: Set(title.trim().to_string()),
        message: Set(message.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let posted = model.insert(&txn).await?;

    for tenant in &recipients {
        notification::create_notification(
            &txn,
            tenant.id,
            notification::KIND_NOTICE,
            None,
            format!("{}: {}", posted.title, posted.message),
        )
        .await?;
    }

    txn.commit().await?;
    Ok(posted)
}

/// Retrieves all notices, newest first.
pub async fn get_all_notices(db: &DatabaseConnection) -> Result<Vec<notice::Model>> {
    Notice::find()
        .order_by_desc(notice::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
