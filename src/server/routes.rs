use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::AppState;
use crate::core::{ApiError, InquiryParams, UpdateMode, parse_records, run_inquiry};

/// Body of a successful `POST /update-mock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    pub mensagem: String,
    pub modo: UpdateMode,
    pub total: usize,
}

pub(crate) async fn inquiry_handler(
    State(state): State<AppState>,
    Query(params): Query<InquiryParams>,
) -> Response {
    let store = state.store.read().await;
    match run_inquiry(&store, &params, state.clock.as_ref()) {
        Ok(records) => {
            info!(
                codigo_inscricao = params.codigo_inscricao.as_deref().unwrap_or_default(),
                numero_inscricao = params.numero_inscricao.as_deref().unwrap_or_default(),
                competencia = params.competencia.as_deref().unwrap_or_default(),
                records = records.len(),
                "inquiry succeeded"
            );
            Json(records).into_response()
        }
        Err(err) => {
            warn!(code = err.code(), reason = %err, "inquiry rejected");
            err.into_response()
        }
    }
}

pub(crate) async fn update_mock_handler(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let mode = match query.get("mode").map(|m| m.parse::<UpdateMode>()) {
        None => UpdateMode::default(),
        Some(Ok(mode)) => mode,
        Some(Err(other)) => {
            let err = ApiError::UnknownMode(other);
            warn!(code = err.code(), reason = %err, "update rejected");
            return err.into_response();
        }
    };

    let records = match serde_json::from_slice::<Value>(&body)
        .map_err(|e| e.to_string())
        .and_then(parse_records)
    {
        Ok(records) => records,
        Err(reason) => {
            let err = ApiError::InvalidBody(reason);
            warn!(code = err.code(), reason = %err, "update rejected");
            return err.into_response();
        }
    };

    let received = records.len();
    // Saving rewrites the whole document on disk; run it on the blocking pool.
    let mut store = state.store.clone().write_owned().await;
    let applied = tokio::task::spawn_blocking(move || store.apply(mode, records))
        .await
        .map_err(|e| ApiError::Persist(e.to_string()));
    match applied.and_then(|outcome| outcome.map_err(ApiError::from)) {
        Ok(total) => {
            info!(mode = %mode, received, total, "mock data updated");
            Json(UpdateSummary {
                mensagem: format!("Dados mockados atualizados com sucesso (modo: {mode})."),
                modo: mode,
                total,
            })
            .into_response()
        }
        Err(err) => {
            error!(mode = %mode, reason = %err, "failed to persist mock data");
            err.into_response()
        }
    }
}

pub(crate) async fn health_handler() -> impl IntoResponse {
    Json(json!({"status": "UP"}))
}

pub(crate) async fn not_found_handler(uri: Uri) -> Response {
    let err = ApiError::RouteNotFound(uri.path().to_string());
    warn!(path = %uri.path(), "route not found");
    err.into_response()
}
