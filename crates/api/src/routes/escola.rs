//! Route definitions for Escolas.

use axum::routing::get;
use axum::Router;

use crate::handlers::escola;
use crate::state::AppState;

/// Routes mounted at `/escolas`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{EscolaGUID}   -> get_by_id
/// PUT    /{EscolaGUID}   -> update
/// DELETE /{EscolaGUID}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(escola::list).post(escola::create))
        .route(
            "/{EscolaGUID}",
            get(escola::get_by_id)
                .put(escola::update)
                .delete(escola::delete),
        )
}
