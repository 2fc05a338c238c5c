//! Repository for the `escola` table.

use async_trait::async_trait;
use escola_core::error::CoreError;
use escola_core::escola::{Escola, EscolaGuid};
use escola_core::field::EscolaField;
use escola_core::repository::EscolaRepository;

use crate::models::escola::EscolaRow;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "EscolaGUID, EscolaNome, EscolaCorPriEs, EscolaCorPriCl, \
                       EscolaCorSecEs, EscolaCorSecCl, EscolaIcone";

/// MySQL-backed [`EscolaRepository`].
#[derive(Clone)]
pub struct EscolaRepo {
    pool: DbPool,
}

impl EscolaRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, query: &str, bind: Option<String>) -> Result<Vec<Escola>, CoreError> {
        let mut q = sqlx::query_as::<_, EscolaRow>(query);
        if let Some(value) = bind {
            q = q.bind(value);
        }
        let rows = q.fetch_all(&self.pool).await.map_err(storage_error)?;
        rows.into_iter().map(EscolaRow::into_escola).collect()
    }
}

#[async_trait]
impl EscolaRepository for EscolaRepo {
    async fn create(&self, escola: &Escola) -> Result<EscolaGuid, CoreError> {
        let query = format!("INSERT INTO escola ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)");
        sqlx::query(&query)
            .bind(escola.guid().as_str())
            .bind(escola.nome())
            .bind(escola.cor_pri_es())
            .bind(escola.cor_pri_cl())
            .bind(escola.cor_sec_es())
            .bind(escola.cor_sec_cl())
            .bind(escola.icone())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        tracing::debug!(escola_guid = %escola.guid(), "Inserted escola row");
        Ok(escola.guid().clone())
    }

    async fn delete(&self, guid: &EscolaGuid) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM escola WHERE EscolaGUID = ?")
            .bind(guid.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, escola: &Escola) -> Result<bool, CoreError> {
        let result = sqlx::query(
            "UPDATE escola SET \
                EscolaNome = ?, \
                EscolaCorPriEs = ?, \
                EscolaCorPriCl = ?, \
                EscolaCorSecEs = ?, \
                EscolaCorSecCl = ?, \
                EscolaIcone = ? \
             WHERE EscolaGUID = ?",
        )
        .bind(escola.nome())
        .bind(escola.cor_pri_es())
        .bind(escola.cor_pri_cl())
        .bind(escola.cor_sec_es())
        .bind(escola.cor_sec_cl())
        .bind(escola.icone())
        .bind(escola.guid().as_str())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }

    /// Ordered by name, then identifier. The filter is a bound `LIKE`
    /// pattern with its wildcards escaped, matched under the case- and
    /// accent-insensitive collation; equality lookups stay byte-exact.
    async fn find_all(&self, nome: Option<&str>) -> Result<Vec<Escola>, CoreError> {
        match nome {
            Some(filter) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM escola \
                     WHERE EscolaNome COLLATE utf8mb4_unicode_ci LIKE ? \
                     ORDER BY EscolaNome, EscolaGUID"
                );
                self.fetch(&query, Some(contains_pattern(filter))).await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM escola ORDER BY EscolaNome, EscolaGUID");
                self.fetch(&query, None).await
            }
        }
    }

    async fn find_by_field(
        &self,
        field: EscolaField,
        value: &str,
    ) -> Result<Vec<Escola>, CoreError> {
        tracing::debug!(%field, value, "Escola lookup by field");
        let query = format!("SELECT {COLUMNS} FROM escola WHERE {} = ?", field.column());
        self.fetch(&query, Some(value.to_string())).await
    }
}

/// `LIKE` pattern matching `filter` anywhere, with `%`, `_` and `\` literal.
fn contains_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Classify a sqlx error. Unique-key violations become conflicts; every
/// other failure is passed through as a storage error.
fn storage_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {}",
                db_err.message()
            ));
        }
    }
    CoreError::Storage(err.to_string())
}
