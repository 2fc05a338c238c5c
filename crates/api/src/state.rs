use escola_core::service::EscolaService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and the service are handles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly only by the health check.
    pub pool: escola_db::DbPool,
    /// Escola use cases, backed by the MySQL repository in production.
    pub escolas: EscolaService,
}
