//! Domain Layer
//!
//! Entity contract and errors. The records themselves are the wire models
//! shared with the client (`shootboard_core::models`).

mod entity;
mod error;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
