//! Audit logging for MileMark
//!
//! Records every create, update and delete of cars, maintenance records,
//! custom maintenance types and users in an append-only JSONL log, together
//! with the entity's state before and after the change.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends entries to the log file and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
