use uuid::Uuid;

use crate::{
    db::DbPool,
    error::{AppError, AppResult},
};

/// Ownership gate for every mutating request: the caller must own the store
/// the path names. Looked up fresh each time, no caching.
pub async fn ensure_store_owner(pool: &DbPool, store_id: Uuid, user_id: &str) -> AppResult<()> {
    let row: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM stores WHERE id = $1 AND user_id = $2")
            .bind(store_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    match row {
        Some(_) => Ok(()),
        None => Err(AppError::Unauthorized),
    }
}
