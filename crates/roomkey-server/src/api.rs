//! API handlers for the roomkey server.

use crate::AppState;
use axum::{
    extract::{Extension, Json, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use roomkey_token::{ConnectionDetails, ParticipantMetadata, TokenError};
use std::sync::Arc;
use thiserror::Error;

/// Query parameters for `GET /api/connection-details`.
#[derive(Debug, Default)]
pub struct ConnectionDetailsQuery {
    /// Voice agent the caller wants; forwarded in participant metadata.
    pub agent_name: Option<String>,
    /// Event the call belongs to; forwarded as `unified_event_id`.
    pub unified_event_id: Option<String>,
}

impl ConnectionDetailsQuery {
    /// Builds the query from raw key/value pairs. The first occurrence of a
    /// repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "agentName" => &mut query.agent_name,
                "unifiedEventId" => &mut query.unified_event_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// API error type. Responds 500 with the error message as plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing configuration or a token construction failure.
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "connection details request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Handler for `GET /api/connection-details`.
///
/// Issues a fresh room and participant token on every call. The
/// `Cache-Control: no-store` header is added by the route layer so it is
/// present on failures too.
pub async fn connection_details_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ConnectionDetails>, ApiError> {
    let query = ConnectionDetailsQuery::from_pairs(pairs);
    let metadata = ParticipantMetadata::new(query.agent_name, query.unified_event_id);
    let details = state.token_service.issue(&metadata)?;

    Ok(Json(details))
}
