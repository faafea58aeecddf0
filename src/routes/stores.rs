use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::stores::UpsertStoreRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Store,
    services::store_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_store))
        .route(
            "/{store_id}",
            get(get_store).patch(update_store).delete(delete_store),
        )
}

#[utoipa::path(
    post,
    path = "/api/stores",
    request_body = UpsertStoreRequest,
    responses(
        (status = 200, description = "Created store", body = Store),
        (status = 400, description = "Name is required"),
        (status = 403, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn create_store(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpsertStoreRequest>,
) -> AppResult<Json<Store>> {
    let store = store_service::create_store(&state, &user, payload).await?;
    Ok(Json(store))
}

#[utoipa::path(
    get,
    path = "/api/stores/{store_id}",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store, or null when absent", body = Store),
    ),
    tag = "Stores"
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<Option<Store>>> {
    let store = store_service::get_store(&state, store_id).await?;
    Ok(Json(store))
}

#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    request_body = UpsertStoreRequest,
    responses(
        (status = 200, description = "Updated store", body = Store),
        (status = 400, description = "Name is required"),
        (status = 403, description = "Unauthenticated"),
        (status = 405, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn update_store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<UpsertStoreRequest>,
) -> AppResult<Json<Store>> {
    let store = store_service::update_store(&state, &user, store_id, payload).await?;
    Ok(Json(store))
}

#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Deleted store", body = Store),
        (status = 403, description = "Unauthenticated"),
        (status = 405, description = "Unauthorized"),
        (status = 500, description = "Store still has dependent rows"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn delete_store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
) -> AppResult<Json<Store>> {
    let store = store_service::delete_store(&state, &user, store_id).await?;
    Ok(Json(store))
}
