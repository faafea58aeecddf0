use axum::Router;

use crate::state::AppState;

pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod reference;
pub mod stores;

// Build the API router without binding state; it will be provided at the top level.
// Route order matters only for readability: matchit gives static segments
// ("stores", "products") priority over the `{entity}` capture.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/stores", stores::router())
        .merge(products::router())
        .merge(reference::router())
}
