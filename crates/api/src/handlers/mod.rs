//! HTTP handler functions, one module per resource.

pub mod auth;
pub mod briefings;
pub mod clients;
pub mod invoices;
pub mod payments;
pub mod preview;
pub mod projects;
pub mod relay;
pub mod webhooks;
