//! Audit trail
//!
//! Append-only records of every mutation in the access core
//! ([`AuditEmitter`]) and their read side ([`AuditLog`]).

pub mod emitter;
pub mod log;
pub mod types;

pub use emitter::AuditEmitter;
pub use log::AuditLog;
pub use types::{
    AccessContext, AccessLogEntry, AccessType, AuditAction, AuditEvent, AuditLogEntry,
    AuditQuery, SubjectType,
};
