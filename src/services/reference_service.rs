use uuid::Uuid;

use crate::{
    dto::reference::UpsertReferenceRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::ReferenceRow,
    reference::ReferenceMeta,
    services::authz::ensure_store_owner,
    state::AppState,
};

// One CRUD implementation for all fifteen reference tables. The table name
// and column list come from static metadata, never from request input, so the
// query strings are safe to assemble with format!.

pub async fn list(
    state: &AppState,
    meta: &ReferenceMeta,
    store_id: Uuid,
) -> AppResult<Vec<ReferenceRow>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE store_id = $1 ORDER BY created_at DESC",
        meta.columns(),
        meta.table
    );
    let rows = sqlx::query_as::<_, ReferenceRow>(&sql)
        .bind(store_id)
        .fetch_all(&state.pool)
        .await?;
    Ok(rows)
}

pub async fn get(
    state: &AppState,
    meta: &ReferenceMeta,
    id: Uuid,
) -> AppResult<Option<ReferenceRow>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = $1",
        meta.columns(),
        meta.table
    );
    let row = sqlx::query_as::<_, ReferenceRow>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    Ok(row)
}

pub async fn create(
    state: &AppState,
    meta: &ReferenceMeta,
    user: &AuthUser,
    store_id: Uuid,
    payload: UpsertReferenceRequest,
) -> AppResult<ReferenceRow> {
    let valid = payload.validate(meta)?;
    ensure_store_owner(&state.pool, store_id, &user.user_id).await?;

    let id = Uuid::new_v4();
    let row = if meta.has_image_url {
        let sql = format!(
            "INSERT INTO {} (id, store_id, name, image_url) VALUES ($1, $2, $3, $4) RETURNING {}",
            meta.table,
            meta.columns()
        );
        sqlx::query_as::<_, ReferenceRow>(&sql)
            .bind(id)
            .bind(store_id)
            .bind(valid.name)
            .bind(valid.image_url)
            .fetch_one(&state.pool)
            .await?
    } else {
        let sql = format!(
            "INSERT INTO {} (id, store_id, name) VALUES ($1, $2, $3) RETURNING {}",
            meta.table,
            meta.columns()
        );
        sqlx::query_as::<_, ReferenceRow>(&sql)
            .bind(id)
            .bind(store_id)
            .bind(valid.name)
            .fetch_one(&state.pool)
            .await?
    };

    tracing::debug!(table = meta.table, id = %row.id, "reference row created");
    Ok(row)
}

pub async fn update(
    state: &AppState,
    meta: &ReferenceMeta,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
    payload: UpsertReferenceRequest,
) -> AppResult<ReferenceRow> {
    let valid = payload.validate(meta)?;
    ensure_store_owner(&state.pool, store_id, &user.user_id).await?;

    let row = if meta.has_image_url {
        let sql = format!(
            "UPDATE {} SET name = $2, image_url = $3, updated_at = now() WHERE id = $1 RETURNING {}",
            meta.table,
            meta.columns()
        );
        sqlx::query_as::<_, ReferenceRow>(&sql)
            .bind(id)
            .bind(valid.name)
            .bind(valid.image_url)
            .fetch_one(&state.pool)
            .await?
    } else {
        let sql = format!(
            "UPDATE {} SET name = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            meta.table,
            meta.columns()
        );
        sqlx::query_as::<_, ReferenceRow>(&sql)
            .bind(id)
            .bind(valid.name)
            .fetch_one(&state.pool)
            .await?
    };

    Ok(row)
}

pub async fn delete(
    state: &AppState,
    meta: &ReferenceMeta,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ReferenceRow> {
    ensure_store_owner(&state.pool, store_id, &user.user_id).await?;

    // A row still referenced by a product trips the foreign key and comes back
    // as a generic 500; the client shows the "remove all products first" hint.
    let sql = format!(
        "DELETE FROM {} WHERE id = $1 RETURNING {}",
        meta.table,
        meta.columns()
    );
    let row = sqlx::query_as::<_, ReferenceRow>(&sql)
        .bind(id)
        .fetch_one(&state.pool)
        .await?;

    tracing::debug!(table = meta.table, id = %id, "reference row deleted");
    Ok(row)
}
