//! Access core wiring
//!
//! Builds every access-control and sharing component from one store.

use crate::audit::{AuditEmitter, AuditLog};
use crate::auth::rbac::{PermissionAdmin, PermissionResolver, RoleTemplateStore};
use crate::config::{Config, Validate};
use crate::sharing::{RandomTokenGenerator, ShareLinkDeps, ShareLinkManager, TokenGenerator};
use crate::storage::{
    AccessLogRepository, AccessStore, AuditLogRepository, ObjectLocator, SignedUrlLocator,
};
use crate::utils::error::Result;
use crate::utils::sys::{Clock, SystemClock};
use std::sync::Arc;
use tracing::info;

/// Every service of the access core, sharing one store
#[derive(Clone)]
pub struct AccessServices {
    pub templates: Arc<RoleTemplateStore>,
    pub resolver: Arc<PermissionResolver>,
    pub admin: Arc<PermissionAdmin>,
    pub share_links: Arc<ShareLinkManager>,
    pub audit_log: Arc<AuditLog>,
    pub emitter: Arc<AuditEmitter>,
}

impl AccessServices {
    pub fn builder<S>(store: Arc<S>, config: Config) -> AccessServicesBuilder<S>
    where
        S: AccessStore + 'static,
    {
        AccessServicesBuilder {
            store,
            config,
            clock: None,
            locator: None,
            tokens: None,
            audit_sink: None,
        }
    }
}

/// Builder for [`AccessServices`]
///
/// Unset collaborators default to the system clock, a [`SignedUrlLocator`]
/// from `storage` config, a [`RandomTokenGenerator`] sized by
/// `sharing.token_bytes`, and the store itself as audit sink.
pub struct AccessServicesBuilder<S> {
    store: Arc<S>,
    config: Config,
    clock: Option<Arc<dyn Clock>>,
    locator: Option<Arc<dyn ObjectLocator>>,
    tokens: Option<Arc<dyn TokenGenerator>>,
    audit_sink: Option<(Arc<dyn AuditLogRepository>, Arc<dyn AccessLogRepository>)>,
}

impl<S> AccessServicesBuilder<S>
where
    S: AccessStore + 'static,
{
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn locator(mut self, locator: Arc<dyn ObjectLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Write audit and access-log entries somewhere other than the store
    pub fn audit_sink(
        mut self,
        audit_logs: Arc<dyn AuditLogRepository>,
        access_logs: Arc<dyn AccessLogRepository>,
    ) -> Self {
        self.audit_sink = Some((audit_logs, access_logs));
        self
    }

    pub fn build(self) -> Result<AccessServices> {
        self.config.validate()?;

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let locator: Arc<dyn ObjectLocator> = match self.locator {
            Some(locator) => locator,
            None => Arc::new(SignedUrlLocator::new(&self.config.storage, clock.clone())?),
        };
        let tokens: Arc<dyn TokenGenerator> = match self.tokens {
            Some(tokens) => tokens,
            None => Arc::new(RandomTokenGenerator::new(self.config.sharing.token_bytes)),
        };
        let (audit_logs, access_logs) = match self.audit_sink {
            Some(sink) => sink,
            None => {
                let audit_logs: Arc<dyn AuditLogRepository> = self.store.clone();
                let access_logs: Arc<dyn AccessLogRepository> = self.store.clone();
                (audit_logs, access_logs)
            }
        };

        let emitter = Arc::new(AuditEmitter::new(
            audit_logs.clone(),
            access_logs.clone(),
            clock.clone(),
        ));
        let templates = Arc::new(RoleTemplateStore::new(self.store.clone(), clock.clone()));
        let resolver = Arc::new(PermissionResolver::new(
            self.store.clone(),
            templates.clone(),
            self.config.rbac.clone(),
        ));
        let admin = Arc::new(PermissionAdmin::new(
            resolver.clone(),
            templates.clone(),
            self.store.clone(),
            emitter.clone(),
        ));
        let share_links = Arc::new(ShareLinkManager::new(
            ShareLinkDeps {
                links: self.store.clone(),
                assets: self.store.clone(),
                access_logs: access_logs.clone(),
                locator,
                tokens,
                resolver: resolver.clone(),
                audit: emitter.clone(),
                clock,
            },
            self.config.sharing.clone(),
        ));
        let audit_log = Arc::new(AuditLog::new(audit_logs, access_logs, resolver.clone()));

        info!("Access services initialized");
        Ok(AccessServices {
            templates,
            resolver,
            admin,
            share_links,
            audit_log,
            emitter,
        })
    }
}
