use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::UpsertProductRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Product, ProductDetail, ProductWithImages},
    routes::params::ProductListQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/products", get(list_products).post(create_product))
        .route(
            "/{store_id}/products/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/products",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("isFeatured" = Option<bool>, Query, description = "Only featured products"),
        ("isArchived" = Option<bool>, Query, description = "Filter by archived flag"),
    ),
    responses(
        (status = 200, description = "Products with their images", body = Vec<ProductWithImages>),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<ProductWithImages>>> {
    let products = product_service::list_products(&state, store_id, query).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/products/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product with images and references, or null", body = ProductDetail),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path((_store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Option<ProductDetail>>> {
    let product = product_service::get_product(&state, id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/{store_id}/products",
    params(("store_id" = Uuid, Path, description = "Store ID")),
    request_body = UpsertProductRequest,
    responses(
        (status = 200, description = "Created product", body = ProductWithImages),
        (status = 400, description = "First missing required field"),
        (status = 403, description = "Unauthenticated"),
        (status = 405, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<UpsertProductRequest>,
) -> AppResult<Json<ProductWithImages>> {
    let product = product_service::create_product(&state, &user, store_id, payload).await?;
    Ok(Json(product))
}

#[utoipa::path(
    patch,
    path = "/api/{store_id}/products/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Product ID"),
    ),
    request_body = UpsertProductRequest,
    responses(
        (status = 200, description = "Updated product; image set fully replaced", body = ProductWithImages),
        (status = 400, description = "First missing required field"),
        (status = 403, description = "Unauthenticated"),
        (status = 405, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpsertProductRequest>,
) -> AppResult<Json<ProductWithImages>> {
    let product = product_service::update_product(&state, &user, store_id, id, payload).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/{store_id}/products/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("id" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Deleted product", body = Product),
        (status = 403, description = "Unauthenticated"),
        (status = 405, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Product>> {
    let product = product_service::delete_product(&state, &user, store_id, id).await?;
    Ok(Json(product))
}
