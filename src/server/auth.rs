use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::AppState;
use crate::core::ApiError;

/// Header carrying the shared secret.
pub(crate) const API_KEY_HEADER: &str = "apikey";

/// Reject requests without the expected `apikey` header value.
pub(crate) async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|v| v.to_str().unwrap_or_default());
    let rejection = match provided {
        None => Some(ApiError::ApiKeyMissing),
        Some(key) if key != &*state.api_key => Some(ApiError::ApiKeyInvalid),
        Some(_) => None,
    };
    if let Some(err) = rejection {
        warn!(path = %request.uri().path(), code = err.code(), "api key rejected");
        return err.into_response();
    }
    next.run(request).await
}
