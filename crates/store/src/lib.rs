//! `stockroom-store` — embedded transactional backing store.
//!
//! Holds the relational tables (users, stock items, suppliers, purchase
//! orders, audit log) behind a single lock. Each mutating operation is one
//! critical section: all checks and writes happen inside it, so no caller
//! ever observes a partially applied update.

pub mod audit;
pub mod snapshot;
pub mod store;

pub use audit::AuditEntry;
pub use snapshot::Snapshot;
pub use store::{DEFAULT_LOW_STOCK_THRESHOLD, DashboardSummary, Store};
