//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! any PostgreSQL executor as the first argument: `&PgPool` for standalone
//! calls, or `&mut *tx` to take part in a caller-owned transaction.

pub mod audit_repo;
pub mod dashboard_repo;
pub mod dispute_repo;
pub mod entry_repo;
pub mod revision_repo;
pub mod user_repo;

pub use audit_repo::AuditLogRepo;
pub use dashboard_repo::DashboardRepo;
pub use dispute_repo::DisputeRepo;
pub use entry_repo::EntryRepo;
pub use revision_repo::RevisionRepo;
pub use user_repo::UserRepo;
