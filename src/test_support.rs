//! Shared fixtures for unit tests

use crate::audit::{AccessContext, AccessLogEntry, AuditLogEntry, AuditQuery};
use crate::config::Config;
use crate::core::models::{Asset, AssetFile, User, UserRole};
use crate::services::{AccessServices, AccessServicesBuilder};
use crate::sharing::TokenGenerator;
use crate::storage::{AccessLogRepository, AuditLogRepository, MemoryStore};
use crate::utils::error::{AccessError, Result};
use crate::utils::sys::ManualClock;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

pub(crate) fn test_config() -> Config {
    let mut config = Config::default();
    config.storage.base_url = "https://objects.example.com/bucket".to_string();
    config.storage.signing_secret = "unit-test-signing-secret".to_string();
    config.sharing.public_base_url = "https://share.example.com".to_string();
    config
}

pub(crate) fn request_context() -> AccessContext {
    AccessContext::new()
        .ip("203.0.113.7")
        .user_agent("test-agent/1.0")
        .country("NL")
}

/// Memory store, manual clock and services wired together
pub(crate) struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub services: AccessServices,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with(|builder| builder)
    }

    pub fn with<F>(customize: F) -> Self
    where
        F: FnOnce(AccessServicesBuilder<MemoryStore>) -> AccessServicesBuilder<MemoryStore>,
    {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::default());
        let builder = AccessServices::builder(store.clone(), test_config()).clock(clock.clone());
        let services = customize(builder).build().unwrap();
        Self {
            store,
            clock,
            services,
        }
    }

    pub fn user(&self, role: UserRole) -> User {
        let user = User::new(format!("{}@example.com", Uuid::new_v4()), role);
        self.store.insert_user(user.clone());
        user
    }

    pub fn insert_user(&self, user: User) -> User {
        self.store.insert_user(user.clone());
        user
    }

    pub fn asset(&self) -> Asset {
        let mut file = AssetFile::new("assets/brochure.pdf", "Brochure 2024.pdf");
        file.content_type = Some("application/pdf".to_string());
        file.size_bytes = Some(482_113);
        let asset = Asset::new("Brochure").with_file(file);
        self.store.insert_asset(asset.clone());
        asset
    }
}

/// Audit sink whose writes always fail
#[derive(Debug)]
pub(crate) struct FailingAuditStore;

#[async_trait]
impl AuditLogRepository for FailingAuditStore {
    async fn append_audit_log(&self, _entry: &AuditLogEntry) -> Result<()> {
        Err(AccessError::internal("audit store unavailable"))
    }

    async fn query_audit_logs(&self, _query: &AuditQuery) -> Result<Vec<AuditLogEntry>> {
        Err(AccessError::internal("audit store unavailable"))
    }
}

#[async_trait]
impl AccessLogRepository for FailingAuditStore {
    async fn append_access_log(&self, _entry: &AccessLogEntry) -> Result<()> {
        Err(AccessError::internal("audit store unavailable"))
    }

    async fn list_access_logs(&self, _share_link_id: Uuid) -> Result<Vec<AccessLogEntry>> {
        Err(AccessError::internal("audit store unavailable"))
    }
}

/// Hands out a fixed sequence of tokens, then repeats the last one
#[derive(Debug)]
pub(crate) struct SequenceTokens {
    tokens: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl SequenceTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: Mutex::new(tokens.into_iter().map(Into::into).collect()),
            last: Mutex::new(String::new()),
        }
    }
}

impl TokenGenerator for SequenceTokens {
    fn generate(&self) -> String {
        let mut last = self.last.lock();
        if let Some(next) = self.tokens.lock().pop_front() {
            *last = next;
        }
        last.clone()
    }
}
