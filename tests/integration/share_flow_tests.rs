//! Share link flows end to end over the SeaORM store

#[cfg(test)]
mod tests {
    use crate::common::{AssetFactory, TestDatabase, UserFactory, request_context};
    use assetgate::AccessError;
    use assetgate::audit::{AccessType, AuditAction, AuditQuery, SubjectType};
    use assetgate::auth::rbac::{Permission, RoleTemplateInput};
    use assetgate::core::models::UserRole;
    use assetgate::sharing::CreateShareLink;
    use assetgate::storage::ShareLinkRepository;
    use assetgate::utils::{Clock, ManualClock};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use futures::future::join_all;
    use std::sync::Arc;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_download_quota_is_enforced() {
        let db = TestDatabase::new().await;
        let clock = Arc::new(ManualClock::new(start()));
        let services = db.services(clock.clone());
        let creator = db.user(UserFactory::creator()).await;
        let asset = db.asset(AssetFactory::with_file()).await;
        let ctx = request_context();

        let created = services
            .share_links
            .create(asset.id, creator.id, CreateShareLink::default().max_downloads(2), &ctx)
            .await
            .unwrap();
        let token = created.link.token.clone();

        for _ in 0..2 {
            let locator = services
                .share_links
                .get_download_locator(&token, None, &ctx)
                .await
                .unwrap();
            assert_eq!(locator.file_name.as_deref(), Some("Launch Deck.pdf"));
        }

        let third = services
            .share_links
            .get_download_locator(&token, None, &ctx)
            .await;
        assert!(matches!(third, Err(AccessError::Forbidden(ref reason)) if reason.contains("limit reached")));

        let stored = db
            .store()
            .find_share_link(created.link.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.current_downloads, 2);
        assert_eq!(stored.download_count, 2);
        assert_eq!(stored.remaining_downloads(), Some(0));
    }

    #[tokio::test]
    async fn test_concurrent_downloads_never_exceed_quota() {
        let db = TestDatabase::new().await;
        let services = db.services(Arc::new(ManualClock::new(start())));
        let creator = db.user(UserFactory::creator()).await;
        let asset = db.asset(AssetFactory::with_file()).await;
        let ctx = request_context();

        let created = services
            .share_links
            .create(asset.id, creator.id, CreateShareLink::default().max_downloads(3), &ctx)
            .await
            .unwrap();

        let attempts = (0..4).map(|_| {
            let manager = services.share_links.clone();
            let token = created.link.token.clone();
            let ctx = ctx.clone();
            async move { manager.get_download_locator(&token, None, &ctx).await }
        });
        let results = join_all(attempts).await;

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 3);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);

        let stored = db
            .store()
            .find_share_link(created.link.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.current_downloads, 3);
    }

    #[tokio::test]
    async fn test_expiry_follows_the_clock() {
        let db = TestDatabase::new().await;
        let clock = Arc::new(ManualClock::new(start()));
        let services = db.services(clock.clone());
        let creator = db.user(UserFactory::creator()).await;
        let asset = db.asset(AssetFactory::with_file()).await;
        let ctx = request_context();

        let created = services
            .share_links
            .create(
                asset.id,
                creator.id,
                CreateShareLink::default().expires_at(start() + Duration::days(7)),
                &ctx,
            )
            .await
            .unwrap();
        let token = created.link.token.clone();

        clock.advance(Duration::days(6));
        let shared = services
            .share_links
            .resolve_for_access(&token, None, &ctx)
            .await
            .unwrap();
        assert!(shared.preview.is_some());

        clock.advance(Duration::days(2));
        let expired = services
            .share_links
            .resolve_for_access(&token, None, &ctx)
            .await;
        assert!(matches!(expired, Err(AccessError::Forbidden(ref reason)) if reason == "expired"));

        // The stored conditional update also refuses the expired link
        let consumed = db
            .store()
            .try_consume_download(created.link.id, clock.now())
            .await
            .unwrap();
        assert!(!consumed);
    }

    #[tokio::test]
    async fn test_revoke_and_reactivate() {
        let db = TestDatabase::new().await;
        let services = db.services(Arc::new(ManualClock::new(start())));
        let creator = db.user(UserFactory::creator()).await;
        let outsider = db.user(UserFactory::client()).await;
        let asset = db.asset(AssetFactory::with_file()).await;
        let ctx = request_context();

        let created = services
            .share_links
            .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
            .await
            .unwrap();
        let link_id = created.link.id;

        let denied = services.share_links.revoke(link_id, outsider.id, &ctx).await;
        assert!(matches!(denied, Err(AccessError::Forbidden(_))));

        let revoked = services
            .share_links
            .revoke(link_id, creator.id, &ctx)
            .await
            .unwrap();
        assert!(!revoked.is_active);

        // Second revoke is a no-op
        services
            .share_links
            .revoke(link_id, creator.id, &ctx)
            .await
            .unwrap();

        let blocked = services
            .share_links
            .resolve_for_access(&created.link.token, None, &ctx)
            .await;
        assert!(matches!(blocked, Err(AccessError::Forbidden(ref reason)) if reason == "revoked"));

        let reactivated = services
            .share_links
            .reactivate(link_id, creator.id, &ctx)
            .await
            .unwrap();
        assert!(reactivated.is_active);

        let history = services
            .audit_log
            .for_subject(SubjectType::ShareLink, link_id)
            .await
            .unwrap();
        let revocations = history
            .iter()
            .filter(|entry| entry.action == AuditAction::ShareLinkRevoked.as_str())
            .count();
        assert_eq!(revocations, 1);
        assert!(
            history
                .iter()
                .any(|entry| entry.action == AuditAction::ShareLinkReactivated.as_str())
        );
    }

    #[tokio::test]
    async fn test_password_protected_link() {
        let db = TestDatabase::new().await;
        let services = db.services(Arc::new(ManualClock::new(start())));
        let creator = db.user(UserFactory::creator()).await;
        let asset = db.asset(AssetFactory::with_file()).await;
        let ctx = request_context();

        let created = services
            .share_links
            .create(
                asset.id,
                creator.id,
                CreateShareLink::default().with_password("correct horse"),
                &ctx,
            )
            .await
            .unwrap();
        let token = created.link.token.clone();
        assert!(created.link.password_hash.is_some());
        assert_ne!(created.link.password_hash.as_deref(), Some("correct horse"));

        let gated = services
            .share_links
            .resolve_for_access(&token, None, &ctx)
            .await
            .unwrap();
        assert!(gated.requires_password);
        assert!(gated.preview.is_none());

        let wrong = services
            .share_links
            .get_download_locator(&token, Some("battery staple"), &ctx)
            .await;
        assert!(matches!(wrong, Err(AccessError::Unauthorized(_))));

        services
            .share_links
            .get_download_locator(&token, Some("correct horse"), &ctx)
            .await
            .unwrap();

        let failures = services
            .audit_log
            .entries(&AuditQuery::default().with_action(AuditAction::ShareLinkPasswordFailed))
            .await
            .unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].actor_user_id, None);
    }

    #[tokio::test]
    async fn test_access_log_and_stats() {
        let db = TestDatabase::new().await;
        let clock = Arc::new(ManualClock::new(start()));
        let services = db.services(clock.clone());
        let creator = db.user(UserFactory::creator()).await;
        let asset = db.asset(AssetFactory::with_file()).await;
        let ctx = request_context();

        let created = services
            .share_links
            .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
            .await
            .unwrap();
        let token = created.link.token.clone();

        services
            .share_links
            .resolve_for_access(&token, None, &ctx)
            .await
            .unwrap();
        clock.advance(Duration::minutes(3));
        services
            .share_links
            .get_download_locator(&token, None, &ctx)
            .await
            .unwrap();

        let entries = services
            .audit_log
            .access_entries(created.link.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].access_type, AccessType::View);
        assert_eq!(entries[1].access_type, AccessType::Download);
        assert_eq!(entries[1].referrer.as_deref(), Some("https://mail.example.com/"));

        let stats = services
            .share_links
            .stats(created.link.id, creator.id)
            .await
            .unwrap();
        assert_eq!(stats.views, 1);
        assert_eq!(stats.downloads, 1);
        assert_eq!(stats.unique_ips, 1);
        assert_eq!(stats.top_countries[0].country, "DE");
        assert_eq!(stats.first_access_at, Some(start()));
        assert_eq!(stats.last_access_at, Some(start() + Duration::minutes(3)));

        let stored = db
            .store()
            .find_share_link(created.link.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.view_count, 1);
        assert_eq!(stored.last_accessed_at, Some(start() + Duration::minutes(3)));
    }

    #[tokio::test]
    async fn test_role_template_drives_resolution() {
        let db = TestDatabase::new().await;
        let services = db.services(Arc::new(ManualClock::new(start())));
        let admin = db.user(UserFactory::admin()).await;
        let moderator = db.user(UserFactory::with_role(UserRole::Moderator)).await;
        let ctx = request_context();

        assert!(
            services
                .resolver
                .has_permission(moderator.id, Permission::ArticlePublish)
                .await
                .unwrap()
        );

        services
            .admin
            .save_role_template(
                admin.id,
                RoleTemplateInput::new(
                    UserRole::Moderator,
                    [Permission::AssetRead, Permission::AssetApproveDownload],
                ),
                &ctx,
            )
            .await
            .unwrap();

        let resolved = services.resolver.resolve(moderator.id).await.unwrap();
        assert!(resolved.template_applied);
        assert!(resolved.has(Permission::AssetApproveDownload));
        assert!(!resolved.has(Permission::ArticlePublish));

        assert!(
            services
                .admin
                .reset_role_template(admin.id, UserRole::Moderator, &ctx)
                .await
                .unwrap()
        );
        let resolved = services.resolver.resolve(moderator.id).await.unwrap();
        assert!(!resolved.template_applied);
        assert!(resolved.has(Permission::ArticlePublish));
    }

    #[tokio::test]
    async fn test_additional_permissions_persist() {
        let db = TestDatabase::new().await;
        let services = db.services(Arc::new(ManualClock::new(start())));
        let admin = db.user(UserFactory::admin()).await;
        let client = db.user(UserFactory::client()).await;
        let ctx = request_context();

        services
            .admin
            .set_additional_permissions(admin.id, client.id, [Permission::AssetShare], &ctx)
            .await
            .unwrap();

        let check = services
            .resolver
            .check_permission_detailed(client.id, Permission::AssetShare)
            .await
            .unwrap();
        assert!(check.granted);

        let audit = services
            .audit_log
            .entries_for(
                admin.id,
                &AuditQuery::for_subject(SubjectType::User, client.id)
                    .with_action(AuditAction::UserPermissionsUpdated),
            )
            .await
            .unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].actor_user_id, Some(admin.id));
    }
}
