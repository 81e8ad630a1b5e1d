//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod briefing_repo;
pub mod client_repo;
pub mod feedback_repo;
pub mod invoice_repo;
pub mod order_repo;
pub mod project_repo;
pub mod session_repo;
pub mod user_repo;
pub mod version_repo;
pub mod webhook_repo;

pub use briefing_repo::BriefingRepo;
pub use client_repo::ClientRepo;
pub use feedback_repo::FeedbackRepo;
pub use invoice_repo::InvoiceRepo;
pub use order_repo::OrderRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use version_repo::VersionRepo;
pub use webhook_repo::WebhookRepo;
