//! In-memory [`EscolaRepository`] for tests of the service and HTTP layers.
//!
//! Enabled inside this crate's own tests and, for other crates, through the
//! `test-util` feature.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::escola::{Escola, EscolaGuid};
use crate::field::EscolaField;
use crate::repository::EscolaRepository;

/// Vec-backed repository with the uniqueness rules of the `escola` table:
/// identifiers and non-null names are unique, compared exactly. The name
/// filter ignores case, like the MySQL filter.
#[derive(Debug, Default)]
pub struct MemoryRepo {
    rows: Mutex<Vec<Escola>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EscolaRepository for MemoryRepo {
    async fn create(&self, escola: &Escola) -> Result<EscolaGuid, CoreError> {
        let mut rows = self.rows.lock().unwrap();
        let clash = rows.iter().any(|r| {
            r.guid() == escola.guid() || (r.nome().is_some() && r.nome() == escola.nome())
        });
        if clash {
            return Err(CoreError::Conflict("duplicate entry".into()));
        }
        rows.push(escola.clone());
        Ok(escola.guid().clone())
    }

    async fn delete(&self, guid: &EscolaGuid) -> Result<bool, CoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.guid() != guid);
        Ok(rows.len() < before)
    }

    async fn update(&self, escola: &Escola) -> Result<bool, CoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.guid() == escola.guid()) {
            Some(row) => {
                *row = escola.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_all(&self, nome: Option<&str>) -> Result<Vec<Escola>, CoreError> {
        let filter = nome.map(str::to_lowercase);
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<Escola> = rows
            .iter()
            .filter(|r| match &filter {
                Some(filter) => r
                    .nome()
                    .is_some_and(|n| n.to_lowercase().contains(filter.as_str())),
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| (a.nome(), a.guid().as_str()).cmp(&(b.nome(), b.guid().as_str())));
        Ok(found)
    }

    async fn find_by_field(
        &self,
        field: EscolaField,
        value: &str,
    ) -> Result<Vec<Escola>, CoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.field(field) == Some(value))
            .cloned()
            .collect())
    }
}
