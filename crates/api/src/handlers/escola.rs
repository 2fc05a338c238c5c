//! Handlers for the `/escolas` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::escola::{CreateEscolaBody, EscolaPath, UpdateEscolaBody};
use crate::query::EscolaListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/escolas
///
/// Create an Escola. The identifier is generated when not supplied.
pub async fn create(
    State(state): State<AppState>,
    CreateEscolaBody(input): CreateEscolaBody,
) -> AppResult<impl IntoResponse> {
    let escola = state.escolas.create_escola(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: escola })))
}

/// GET /api/v1/escolas?nome=
///
/// List Escolas, optionally only those whose name contains `nome`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EscolaListParams>,
) -> AppResult<impl IntoResponse> {
    let escolas = state.escolas.find_all(params.nome.as_deref()).await?;
    Ok(Json(DataResponse { data: escolas }))
}

/// GET /api/v1/escolas/{EscolaGUID}
pub async fn get_by_id(
    State(state): State<AppState>,
    EscolaPath(guid): EscolaPath,
) -> AppResult<impl IntoResponse> {
    let escola = state.escolas.find_by_id(&guid).await?;
    Ok(Json(DataResponse { data: escola }))
}

/// PUT /api/v1/escolas/{EscolaGUID}
///
/// Partial update: keys present in the body (even as `null`) replace the
/// stored value, absent keys keep it.
pub async fn update(
    State(state): State<AppState>,
    EscolaPath(guid): EscolaPath,
    UpdateEscolaBody(patch): UpdateEscolaBody,
) -> AppResult<impl IntoResponse> {
    let escola = state.escolas.update_escola(&guid, patch).await?;
    Ok(Json(DataResponse { data: escola }))
}

/// DELETE /api/v1/escolas/{EscolaGUID}
///
/// 204 when removed. An unknown identifier is not an error at the service
/// level; it is answered with a 404 body here.
pub async fn delete(
    State(state): State<AppState>,
    EscolaPath(guid): EscolaPath,
) -> AppResult<Response> {
    if state.escolas.delete_escola(&guid).await? {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body = json!({
        "error": format!("Escola with id {guid} not found"),
        "code": "NOT_FOUND",
    });
    Ok((StatusCode::NOT_FOUND, Json(body)).into_response())
}
