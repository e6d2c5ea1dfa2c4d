use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;

use crate::advisory::{AdvisoryError, Outcome};
use crate::types::advisory::{AdvisoryRequest, AdvisoryResult};
use crate::types::server::Data;

/// `POST /api/generate-fix`
///
/// Body rejections (size limit, broken stream) and decoding are handled here
/// so that every failure gets the same two-field answer.
pub async fn handle(
    State(data): State<Arc<Data>>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<AdvisoryResult>) {
    let request = body
        .map_err(AdvisoryError::UnreadableBody)
        .and_then(|body| {
            serde_json::from_slice::<AdvisoryRequest>(&body).map_err(AdvisoryError::InvalidRequest)
        });

    let outcome = match request {
        Ok(request) => data.advisor.advise(&request).await,
        Err(error) => Outcome::from_error(&error),
    };

    (outcome.status, Json(outcome.result))
}
