use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::LeadSubmission;
use super::relay::LeadRelay;
use super::service::{LeadService, LeadServiceError};

/// Router builder for the public contact and estimation forms.
pub fn lead_router<R>(service: Arc<LeadService<R>>) -> Router
where
    R: LeadRelay + 'static,
{
    Router::new()
        .route("/api/v1/leads", post(submit_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRelay + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let payload = json!({
                "lead_id": record.lead_id,
                "kind": record.kind,
                "received_at": record.received_at,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let status = match &err {
                LeadServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                LeadServiceError::Relay(_) => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({ "error": err.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}
