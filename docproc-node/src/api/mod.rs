mod auth;
pub mod content;
mod error;
pub mod health;
mod state;
pub mod urls;

pub use auth::{require_api_key, API_KEY_HEADER};
pub use error::ApiError;
pub use state::AppState;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

/// Full HTTP surface. Health routes are public; processing routes sit behind
/// the API key check, which runs before any request body is read.
pub fn create_router(state: AppState) -> Router {
    let processing = Router::new()
        .merge(content::routes())
        .merge(urls::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .merge(health::routes())
        .merge(processing)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
