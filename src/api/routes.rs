use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::types::server::Data;

pub mod generate_fix;
pub mod ping;

pub fn build(data: Data) -> Router {
    Router::new()
        .route("/api/generate-fix", post(generate_fix::handle))
        .route("/ping", get(ping::handle))
        .with_state(Arc::new(data))
}
