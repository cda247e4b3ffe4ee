//! Best-effort audit emitter
//!
//! Every mutation in the access core reports here. A failed write is logged
//! and counted; it never fails the operation that produced it.

use super::types::{AccessLogEntry, AuditEvent};
use crate::storage::{AccessLogRepository, AuditLogRepository};
use crate::utils::sys::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error};
use uuid::Uuid;

pub struct AuditEmitter {
    audit_logs: Arc<dyn AuditLogRepository>,
    access_logs: Arc<dyn AccessLogRepository>,
    clock: Arc<dyn Clock>,
    failures: AtomicU64,
}

impl std::fmt::Debug for AuditEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditEmitter")
            .field("failures", &self.failure_count())
            .finish_non_exhaustive()
    }
}

impl AuditEmitter {
    pub fn new(
        audit_logs: Arc<dyn AuditLogRepository>,
        access_logs: Arc<dyn AccessLogRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            audit_logs,
            access_logs,
            clock,
            failures: AtomicU64::new(0),
        }
    }

    /// Append an audit entry. Returns the entry id if it was stored.
    pub async fn emit(&self, event: AuditEvent) -> Option<Uuid> {
        let action = event.action();
        let entry = event.into_entry(self.clock.now());

        match self.audit_logs.append_audit_log(&entry).await {
            Ok(()) => {
                debug!("Audit entry {} recorded: {}", entry.id, action);
                Some(entry.id)
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                error!(action = %action, "Failed to record audit entry: {}", e);
                None
            }
        }
    }

    /// Append a share link access-log entry. Returns whether it was stored.
    pub async fn record_access(&self, entry: AccessLogEntry) -> bool {
        match self.access_logs.append_access_log(&entry).await {
            Ok(()) => true,
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                error!(
                    share_link_id = %entry.share_link_id,
                    access_type = entry.access_type.as_str(),
                    "Failed to record access log entry: {}",
                    e
                );
                false
            }
        }
    }

    /// Number of audit or access-log writes that failed since startup
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}
