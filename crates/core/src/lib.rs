//! Domain logic for the Harmonia music-commissioning backend.
//!
//! This crate is deliberately light on dependencies: lifecycle state
//! machine, preview-token handling, the snapshot cache, and the wire
//! contracts for the relay and outbound notifications. Everything that
//! touches Postgres or HTTP lives in `harmonia-db` and `harmonia-api`.

pub mod cache;
pub mod error;
pub mod notify;
pub mod preview;
pub mod relay;
pub mod status;
pub mod types;
