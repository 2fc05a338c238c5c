//! Domain layer for Escola (school) records.
//!
//! Holds the validated entity, the closed set of queryable fields, the
//! repository contract implemented by `escola-db`, and the application
//! service that orchestrates create/list/fetch/update/delete.

pub mod error;
pub mod escola;
pub mod field;
pub mod input;
pub mod repository;
pub mod service;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
