//! Row struct for the `escola` table.

use escola_core::error::CoreError;
use escola_core::escola::{Escola, EscolaAttributes, EscolaGuid};
use sqlx::FromRow;

/// A row from the `escola` table, as stored.
///
/// `EscolaGUID` and `EscolaNome` use a binary collation, which MySQL reports
/// as `VARBINARY`; sqlx will not decode those into `String`, so they are read
/// as raw bytes and checked for UTF-8 in [`EscolaRow::into_escola`].
#[derive(Debug, Clone, FromRow)]
pub struct EscolaRow {
    #[sqlx(rename = "EscolaGUID")]
    pub guid: Vec<u8>,
    #[sqlx(rename = "EscolaNome")]
    pub nome: Option<Vec<u8>>,
    #[sqlx(rename = "EscolaCorPriEs")]
    pub cor_pri_es: Option<String>,
    #[sqlx(rename = "EscolaCorPriCl")]
    pub cor_pri_cl: Option<String>,
    #[sqlx(rename = "EscolaCorSecEs")]
    pub cor_sec_es: Option<String>,
    #[sqlx(rename = "EscolaCorSecCl")]
    pub cor_sec_cl: Option<String>,
    #[sqlx(rename = "EscolaIcone")]
    pub icone: Option<Vec<u8>>,
}

impl EscolaRow {
    /// Materialize the row as a validated entity.
    ///
    /// A stored value that no longer passes validation is reported as a
    /// storage error, since the caller's input is not at fault.
    pub fn into_escola(self) -> Result<Escola, CoreError> {
        let raw_guid = utf8(self.guid, "EscolaGUID")?;
        let guid = EscolaGuid::parse(&raw_guid).map_err(|e| corrupt(&raw_guid, e))?;
        let nome = self
            .nome
            .map(|bytes| utf8(bytes, "EscolaNome"))
            .transpose()?;
        let attributes = EscolaAttributes {
            nome,
            cor_pri_es: self.cor_pri_es,
            cor_pri_cl: self.cor_pri_cl,
            cor_sec_es: self.cor_sec_es,
            cor_sec_cl: self.cor_sec_cl,
            icone: self.icone,
        };
        Escola::build(guid, attributes).map_err(|e| corrupt(&raw_guid, e))
    }
}

fn utf8(bytes: Vec<u8>, column: &str) -> Result<String, CoreError> {
    String::from_utf8(bytes)
        .map_err(|e| CoreError::Storage(format!("escola column {column} is not UTF-8: {e}")))
}

fn corrupt(guid: &str, err: CoreError) -> CoreError {
    CoreError::Storage(format!("escola row {guid} failed validation: {err}"))
}
