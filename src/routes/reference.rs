use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::reference::UpsertReferenceRequest,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::ReferenceRow,
    reference::ReferenceMeta,
    services::reference_service,
    state::AppState,
};

// All fifteen reference entities share these handlers; the `{entity}` path
// segment picks the table. Static sibling routes (products, stores) win over
// the capture, so only real reference segments land here.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{store_id}/{entity}",
            get(list_references).post(create_reference),
        )
        .route(
            "/{store_id}/{entity}/{id}",
            get(get_reference)
                .patch(update_reference)
                .delete(delete_reference),
        )
}

fn resolve(entity: &str) -> AppResult<&'static ReferenceMeta> {
    ReferenceMeta::by_path(entity).ok_or(AppError::NotFound)
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/{entity}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("entity" = String, Path, description = "Reference entity segment, e.g. makes, colors, fuel-types"),
    ),
    responses(
        (status = 200, description = "All rows for the store", body = Vec<ReferenceRow>),
        (status = 404, description = "Unknown entity segment"),
    ),
    tag = "Reference data"
)]
pub async fn list_references(
    State(state): State<AppState>,
    Path((store_id, entity)): Path<(Uuid, String)>,
) -> AppResult<Json<Vec<ReferenceRow>>> {
    let meta = resolve(&entity)?;
    let rows = reference_service::list(&state, meta, store_id).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/{entity}/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("entity" = String, Path, description = "Reference entity segment"),
        ("id" = Uuid, Path, description = "Row ID"),
    ),
    responses(
        (status = 200, description = "The row, or null when absent", body = ReferenceRow),
    ),
    tag = "Reference data"
)]
pub async fn get_reference(
    State(state): State<AppState>,
    Path((_store_id, entity, id)): Path<(Uuid, String, Uuid)>,
) -> AppResult<Json<Option<ReferenceRow>>> {
    let meta = resolve(&entity)?;
    let row = reference_service::get(&state, meta, id).await?;
    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/api/{store_id}/{entity}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("entity" = String, Path, description = "Reference entity segment"),
    ),
    request_body = UpsertReferenceRequest,
    responses(
        (status = 200, description = "Created row", body = ReferenceRow),
        (status = 400, description = "Missing field"),
        (status = 403, description = "Unauthenticated"),
        (status = 405, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn create_reference(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, entity)): Path<(Uuid, String)>,
    Json(payload): Json<UpsertReferenceRequest>,
) -> AppResult<Json<ReferenceRow>> {
    let meta = resolve(&entity)?;
    let row = reference_service::create(&state, meta, &user, store_id, payload).await?;
    Ok(Json(row))
}

#[utoipa::path(
    patch,
    path = "/api/{store_id}/{entity}/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("entity" = String, Path, description = "Reference entity segment"),
        ("id" = Uuid, Path, description = "Row ID"),
    ),
    request_body = UpsertReferenceRequest,
    responses(
        (status = 200, description = "Updated row", body = ReferenceRow),
        (status = 400, description = "Missing field"),
        (status = 403, description = "Unauthenticated"),
        (status = 405, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn update_reference(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, entity, id)): Path<(Uuid, String, Uuid)>,
    Json(payload): Json<UpsertReferenceRequest>,
) -> AppResult<Json<ReferenceRow>> {
    let meta = resolve(&entity)?;
    let row = reference_service::update(&state, meta, &user, store_id, id, payload).await?;
    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/api/{store_id}/{entity}/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("entity" = String, Path, description = "Reference entity segment"),
        ("id" = Uuid, Path, description = "Row ID"),
    ),
    responses(
        (status = 200, description = "Deleted row", body = ReferenceRow),
        (status = 403, description = "Unauthenticated"),
        (status = 405, description = "Unauthorized"),
        (status = 500, description = "Row still referenced by a product"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reference data"
)]
pub async fn delete_reference(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, entity, id)): Path<(Uuid, String, Uuid)>,
) -> AppResult<Json<ReferenceRow>> {
    let meta = resolve(&entity)?;
    let row = reference_service::delete(&state, meta, &user, store_id, id).await?;
    Ok(Json(row))
}
