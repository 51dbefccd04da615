//! Audit logging
//!
//! Every create, update and delete performed by the service layer is
//! appended to `audit.log` as one JSON line, with before/after snapshots and
//! a field-level diff for updates. A bulk settlement is a single update entry.

mod diff;
mod entry;
mod logger;

pub use diff::{collect_changes, generate_diff};
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
