pub mod escola;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /escolas                  list, create
/// /escolas/{EscolaGUID}     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/escolas", escola::router())
}
