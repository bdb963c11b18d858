use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sentiserve_core::{Error, Label};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

/// Maximum accepted text length, in characters.
pub const MAX_TEXT_LEN: usize = 10_000;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub label: Label,
    pub score: f64,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let len = req.text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ApiError(Error::InputTooLarge {
            len,
            max: MAX_TEXT_LEN,
        }));
    }

    let prediction = state.predictor.predict(&req.text).map_err(ApiError)?;
    Ok(Json(PredictResponse {
        label: prediction.label,
        score: prediction.score,
    }))
}

/// Maps each core error kind onto its user-facing status code without
/// inspecting error text.
pub struct ApiError(pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::InputTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::ModelNotFound { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "prediction failed");
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
