//! Request handlers.
//!
//! Handlers delegate to the service held in [`AppState`](crate::state::AppState)
//! and map errors via [`AppError`](crate::error::AppError).

pub mod escola;
pub mod health;
