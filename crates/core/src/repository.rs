//! Persistence contract for Escola records.
//!
//! Implemented against MySQL by `escola_db::repositories::EscolaRepo`.
//! Absence is never an error: lookups return `None`/empty, and `delete` and
//! `update` report whether a row was touched.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::escola::{Escola, EscolaGuid};
use crate::field::EscolaField;

#[async_trait]
pub trait EscolaRepository: Send + Sync {
    /// Insert one row with all seven columns. A taken identifier (or name)
    /// fails with [`CoreError::Conflict`].
    async fn create(&self, escola: &Escola) -> Result<EscolaGuid, CoreError>;

    /// Remove the row. Returns `true` if a row was removed.
    async fn delete(&self, guid: &EscolaGuid) -> Result<bool, CoreError>;

    /// Overwrite every mutable column of the row with the entity's identifier.
    async fn update(&self, escola: &Escola) -> Result<bool, CoreError>;

    /// Every row, or only rows whose name contains `nome` when given.
    async fn find_all(&self, nome: Option<&str>) -> Result<Vec<Escola>, CoreError>;

    /// Rows whose `field` column equals `value`.
    async fn find_by_field(
        &self,
        field: EscolaField,
        value: &str,
    ) -> Result<Vec<Escola>, CoreError>;

    async fn find_by_id(&self, guid: &EscolaGuid) -> Result<Option<Escola>, CoreError> {
        let rows = self.find_by_field(EscolaField::Guid, guid.as_str()).await?;
        Ok(rows.into_iter().next())
    }
}
