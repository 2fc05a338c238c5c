//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /escolas` (`?nome=`).
#[derive(Debug, Deserialize)]
pub struct EscolaListParams {
    /// Substring of the name to filter by.
    pub nome: Option<String>,
}
