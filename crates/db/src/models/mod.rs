//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod briefing;
pub mod client;
pub mod feedback;
pub mod invoice;
pub mod order;
pub mod project;
pub mod user;
pub mod version;
pub mod webhook;
