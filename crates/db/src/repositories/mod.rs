//! Repository layer.
//!
//! Each repository owns a clone of the shared [`DbPool`](crate::DbPool) and
//! implements the matching `escola_core` repository trait.

pub mod escola_repo;

pub use escola_repo::EscolaRepo;
