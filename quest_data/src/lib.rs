//! Shared data model for quest definitions.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_quest};
