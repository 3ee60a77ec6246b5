//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs for the operations on that entity

pub mod audit;
pub mod dashboard;
pub mod dispute;
pub mod entry;
pub mod revision;
pub mod user;
