//! Request validation extractors.
//!
//! - [`escola::EscolaPath`] -- validated `{EscolaGUID}` path segment.
//! - [`escola::CreateEscolaBody`] -- `{ "escola": ... }` body for create.
//! - [`escola::UpdateEscolaBody`] -- `{ "escola": ... }` body for partial update.

pub mod escola;
