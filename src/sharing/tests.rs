//! Tests for share link behaviour

use super::*;
use crate::audit::{AccessContext, AccessType, AuditAction, AuditQuery, SubjectType};
use crate::auth::rbac::Permission;
use crate::core::models::{Asset, User, UserRole};
use crate::storage::ShareLinkRepository;
use crate::test_support::{FailingAuditStore, SequenceTokens, TestEnv, request_context};
use crate::utils::error::AccessError;
use crate::utils::sys::Clock;
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

fn forbidden_reason(err: AccessError) -> String {
    match err {
        AccessError::Forbidden(reason) => reason,
        other => panic!("expected Forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_then_resolve_round_trip() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = request_context();

    let created = env
        .services
        .share_links
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();
    assert_eq!(
        created.url,
        format!("https://share.example.com/share/{}", created.link.token)
    );
    assert!(created.link.is_active);
    assert_eq!(created.link.created_by, creator.id);

    let shared = env
        .services
        .share_links
        .resolve_for_access(&created.link.token, None, &ctx)
        .await
        .unwrap();

    assert_eq!(shared.asset.id, asset.id);
    assert_eq!(shared.asset.title, "Brochure");
    assert_eq!(shared.asset.file_name.as_deref(), Some("Brochure 2024.pdf"));
    assert!(!shared.requires_password);
    assert!(shared.preview.is_some());
    assert_eq!(
        shared.download.and_then(|d| d.file_name).as_deref(),
        Some("Brochure 2024.pdf")
    );

    let stored = env
        .store
        .find_share_link(created.link.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.view_count, 1);
    assert_eq!(stored.last_accessed_at, Some(env.clock.now()));

    let log = env
        .services
        .audit_log
        .access_entries(created.link.id)
        .await
        .unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].access_type, AccessType::View);
    assert_eq!(log[0].country.as_deref(), Some("NL"));
}

#[tokio::test]
async fn test_create_is_audited() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();

    let created = env
        .services
        .share_links
        .create(
            asset.id,
            creator.id,
            CreateShareLink::default().max_downloads(3),
            &request_context(),
        )
        .await
        .unwrap();

    let entries = env
        .services
        .audit_log
        .for_subject(SubjectType::ShareLink, created.link.id)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::ShareLinkCreated.as_str());
    assert_eq!(entries[0].actor_user_id, Some(creator.id));
    assert_eq!(entries[0].metadata["max_downloads"], serde_json::json!(3));
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let manager = &env.services.share_links;
    let ctx = AccessContext::default();

    let err = manager
        .create(asset.id, creator.id, CreateShareLink::default().with_password(""), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::BadRequest(_)));

    let err = manager
        .create(asset.id, creator.id, CreateShareLink::default().max_downloads(0), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::BadRequest(_)));

    let err = manager
        .create(Uuid::new_v4(), creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::NotFound(_)));

    let bare = Asset::new("No file yet");
    env.store.insert_asset(bare.clone());
    let err = manager
        .create(bare.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::InvalidState(_)));
}

#[tokio::test]
async fn test_each_create_mints_a_fresh_token() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();

    let first = env
        .services
        .share_links
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();
    let second = env
        .services
        .share_links
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();

    assert_ne!(first.link.token, second.link.token);
    assert!(first.link.token.len() >= 22);
}

#[tokio::test]
async fn test_token_collision_is_retried() {
    let tokens = Arc::new(SequenceTokens::new(["taken", "taken", "fresh"]));
    let env = TestEnv::with(|builder| builder.token_generator(tokens));
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;

    let first = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();
    assert_eq!(first.link.token, "taken");

    let second = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();
    assert_eq!(second.link.token, "fresh");

    // The generator now only repeats "fresh"
    let err = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Conflict(_)));
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let created = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();

    let once = manager.revoke(created.link.id, creator.id, &ctx).await.unwrap();
    let twice = manager.revoke(created.link.id, creator.id, &ctx).await.unwrap();
    assert!(!once.is_active);
    assert!(!twice.is_active);

    let revocations = env
        .services
        .audit_log
        .entries(
            &AuditQuery::for_subject(SubjectType::ShareLink, created.link.id)
                .with_action(AuditAction::ShareLinkRevoked),
        )
        .await
        .unwrap();
    assert_eq!(revocations.len(), 1);

    let err = manager
        .resolve_for_access(&created.link.token, None, &ctx)
        .await
        .unwrap_err();
    assert_eq!(forbidden_reason(err), "revoked");
}

#[tokio::test]
async fn test_only_creator_or_admin_manages_link() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let other = env.user(UserRole::ContentCreator);
    let admin = env.user(UserRole::Admin);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let created = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();

    let err = manager.revoke(created.link.id, other.id, &ctx).await.unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));
    let err = manager.stats(created.link.id, other.id).await.unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));

    let revoked = manager.revoke(created.link.id, admin.id, &ctx).await.unwrap();
    assert!(!revoked.is_active);
    let reactivated = manager
        .reactivate(created.link.id, creator.id, &ctx)
        .await
        .unwrap();
    assert!(reactivated.is_active);
}

#[tokio::test]
async fn test_share_link_manage_grants_management_of_others_links() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let moderator = env.user(UserRole::Moderator);
    let granted = env.insert_user(
        User::new("pm-with-grant@example.com", UserRole::ProjectManager)
            .with_additional_permissions([Permission::ShareLinkManage]),
    );
    let project_manager = env.user(UserRole::ProjectManager);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let created = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();

    let err = manager
        .revoke(created.link.id, project_manager.id, &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));
    assert!(manager.stats(created.link.id, project_manager.id).await.is_err());
    assert!(
        manager
            .list_for_asset(asset.id, project_manager.id)
            .await
            .unwrap()
            .is_empty()
    );

    let revoked = manager
        .revoke(created.link.id, moderator.id, &ctx)
        .await
        .unwrap();
    assert!(!revoked.is_active);
    assert!(manager.stats(created.link.id, moderator.id).await.is_ok());
    assert_eq!(manager.list_for_asset(asset.id, moderator.id).await.unwrap().len(), 1);

    let reactivated = manager
        .reactivate(created.link.id, granted.id, &ctx)
        .await
        .unwrap();
    assert!(reactivated.is_active);
}

#[tokio::test]
async fn test_expired_link_is_forbidden_while_active() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;

    let created = manager
        .create(
            asset.id,
            creator.id,
            CreateShareLink::default().expires_at(env.clock.now() - Duration::hours(1)),
            &ctx,
        )
        .await
        .unwrap();
    assert!(created.link.is_active);

    let err = manager
        .resolve_for_access(&created.link.token, None, &ctx)
        .await
        .unwrap_err();
    assert_eq!(forbidden_reason(err), "expired");
    let err = manager
        .get_download_locator(&created.link.token, None, &ctx)
        .await
        .unwrap_err();
    assert_eq!(forbidden_reason(err), "expired");
}

#[tokio::test]
async fn test_link_expires_as_clock_advances() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let created = manager
        .create(
            asset.id,
            creator.id,
            CreateShareLink::default().expires_at(env.clock.now() + Duration::hours(1)),
            &ctx,
        )
        .await
        .unwrap();

    assert!(manager
        .resolve_for_access(&created.link.token, None, &ctx)
        .await
        .is_ok());

    env.clock.advance(Duration::hours(1));
    let err = manager
        .resolve_for_access(&created.link.token, None, &ctx)
        .await
        .unwrap_err();
    assert_eq!(forbidden_reason(err), "expired");
}

#[tokio::test]
async fn test_reactivate_after_expiry_is_invalid() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let created = manager
        .create(
            asset.id,
            creator.id,
            CreateShareLink::default().expires_at(env.clock.now() - Duration::hours(1)),
            &ctx,
        )
        .await
        .unwrap();

    manager.revoke(created.link.id, creator.id, &ctx).await.unwrap();
    let err = manager
        .reactivate(created.link.id, creator.id, &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::InvalidState(_)));
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let env = TestEnv::new();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;

    assert!(matches!(
        manager.resolve_for_access("no-such-token", None, &ctx).await,
        Err(AccessError::NotFound(_))
    ));
    assert!(matches!(
        manager.get_download_locator("no-such-token", None, &ctx).await,
        Err(AccessError::NotFound(_))
    ));
    assert!(matches!(
        manager.verify_password("no-such-token", "pw", &ctx).await,
        Err(AccessError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_downloads_never_exceed_quota() {
    const MAX: u32 = 3;

    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let created = env
        .services
        .share_links
        .create(
            asset.id,
            creator.id,
            CreateShareLink::default().max_downloads(MAX),
            &AccessContext::default(),
        )
        .await
        .unwrap();

    let handles: Vec<_> = (0..=MAX)
        .map(|i| {
            let manager = env.services.share_links.clone();
            let token = created.link.token.clone();
            tokio::spawn(async move {
                let ctx = AccessContext::new().ip(format!("198.51.100.{}", i));
                manager.get_download_locator(&token, None, &ctx).await
            })
        })
        .collect();

    let mut granted = 0;
    let mut refused = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => granted += 1,
            Err(err) => refused.push(err),
        }
    }

    assert_eq!(granted, MAX);
    assert_eq!(refused.len(), 1);
    for err in refused {
        assert_eq!(forbidden_reason(err), "limit reached");
    }

    let stored = env
        .store
        .find_share_link(created.link.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.current_downloads, MAX);
    assert_eq!(stored.download_count, u64::from(MAX));
}

#[tokio::test]
async fn test_exhausted_link_refuses_access() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let created = manager
        .create(asset.id, creator.id, CreateShareLink::default().max_downloads(1), &ctx)
        .await
        .unwrap();

    let locator = manager
        .get_download_locator(&created.link.token, None, &ctx)
        .await
        .unwrap();
    assert_eq!(locator.file_name.as_deref(), Some("Brochure 2024.pdf"));

    let err = manager
        .resolve_for_access(&created.link.token, None, &ctx)
        .await
        .unwrap_err();
    assert_eq!(forbidden_reason(err), "limit reached");
}

#[tokio::test]
async fn test_view_only_link() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let created = manager
        .create(asset.id, creator.id, CreateShareLink::default().view_only(), &ctx)
        .await
        .unwrap();

    let shared = manager
        .resolve_for_access(&created.link.token, None, &ctx)
        .await
        .unwrap();
    assert!(shared.preview.is_some());
    assert!(shared.download.is_none());

    let err = manager
        .get_download_locator(&created.link.token, None, &ctx)
        .await
        .unwrap_err();
    assert_eq!(forbidden_reason(err), "downloads disabled");
}

#[tokio::test]
async fn test_password_gates_download() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = request_context();
    let manager = &env.services.share_links;
    let created = manager
        .create(
            asset.id,
            creator.id,
            CreateShareLink::default().with_password("open sesame"),
            &ctx,
        )
        .await
        .unwrap();
    let token = created.link.token.as_str();

    let err = manager.get_download_locator(token, None, &ctx).await.unwrap_err();
    assert!(matches!(err, AccessError::Unauthorized(_)));

    let err = manager
        .get_download_locator(token, Some("guess"), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Unauthorized(_)));

    let locator = manager
        .get_download_locator(token, Some("open sesame"), &ctx)
        .await
        .unwrap();
    assert_eq!(locator.file_name.as_deref(), Some("Brochure 2024.pdf"));

    let failures = env
        .services
        .audit_log
        .entries(
            &AuditQuery::for_subject(SubjectType::ShareLink, created.link.id)
                .with_action(AuditAction::ShareLinkPasswordFailed),
        )
        .await
        .unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].actor_user_id, None);
}

#[tokio::test]
async fn test_protected_link_hides_locators_until_password() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let created = manager
        .create(
            asset.id,
            creator.id,
            CreateShareLink::default().with_password("hunter2"),
            &ctx,
        )
        .await
        .unwrap();
    let token = created.link.token.as_str();

    let shared = manager.resolve_for_access(token, None, &ctx).await.unwrap();
    assert!(shared.requires_password);
    assert!(shared.link.has_password);
    assert!(shared.preview.is_none());
    assert!(shared.download.is_none());
    assert_eq!(shared.asset.title, "Brochure");

    let err = manager
        .resolve_for_access(token, Some("wrong"), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Unauthorized(_)));

    let shared = manager
        .resolve_for_access(token, Some("hunter2"), &ctx)
        .await
        .unwrap();
    assert!(shared.preview.is_some());
    assert!(shared.download.is_some());

    let stored = env.store.find_share_link(created.link.id).await.unwrap().unwrap();
    assert_eq!(stored.view_count, 1);
}

#[tokio::test]
async fn test_verify_password() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;
    let open = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();
    let protected = manager
        .create(
            asset.id,
            creator.id,
            CreateShareLink::default().with_password("s3cret"),
            &ctx,
        )
        .await
        .unwrap();

    assert!(matches!(
        manager.verify_password(&open.link.token, "s3cret", &ctx).await,
        Err(AccessError::BadRequest(_))
    ));
    assert!(matches!(
        manager.verify_password(&protected.link.token, "nope", &ctx).await,
        Err(AccessError::Unauthorized(_))
    ));
    assert!(manager
        .verify_password(&protected.link.token, "s3cret", &ctx)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_audit_failure_does_not_fail_download() {
    let sink = Arc::new(FailingAuditStore);
    let env = TestEnv::with(|builder| builder.audit_sink(sink.clone(), sink));
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;

    let created = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();
    manager
        .get_download_locator(&created.link.token, None, &ctx)
        .await
        .unwrap();

    // SHARE_LINK_CREATED, the DOWNLOAD record and SHARE_LINK_DOWNLOADED
    assert_eq!(env.services.emitter.failure_count(), 3);
    let stored = env.store.find_share_link(created.link.id).await.unwrap().unwrap();
    assert_eq!(stored.download_count, 1);
}

#[tokio::test]
async fn test_stats_from_access_log() {
    let env = TestEnv::new();
    let creator = env.user(UserRole::ContentCreator);
    let asset = env.asset();
    let manager = &env.services.share_links;
    let created = manager
        .create(asset.id, creator.id, CreateShareLink::default(), &AccessContext::default())
        .await
        .unwrap();
    let token = created.link.token.as_str();

    let dutch = AccessContext::new().ip("203.0.113.7").country("NL");
    let german = AccessContext::new().ip("192.0.2.10").country("DE");
    manager.resolve_for_access(token, None, &dutch).await.unwrap();
    env.clock.advance(Duration::minutes(5));
    manager.resolve_for_access(token, None, &german).await.unwrap();
    manager.get_download_locator(token, None, &dutch).await.unwrap();

    let stats = manager.stats(created.link.id, creator.id).await.unwrap();
    assert_eq!(stats.views, 2);
    assert_eq!(stats.downloads, 1);
    assert_eq!(stats.unique_ips, 2);
    assert_eq!(stats.top_countries[0].country, "NL");
    assert_eq!(stats.top_countries[0].count, 2);
    assert_eq!(stats.last_access_at, Some(env.clock.now()));
    assert!(stats.first_access_at < stats.last_access_at);
}

#[tokio::test]
async fn test_list_for_asset_visibility() {
    let env = TestEnv::new();
    let alice = env.user(UserRole::ContentCreator);
    let bob = env.user(UserRole::ProjectManager);
    let admin = env.user(UserRole::Admin);
    let asset = env.asset();
    let ctx = AccessContext::default();
    let manager = &env.services.share_links;

    manager
        .create(asset.id, alice.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();
    manager
        .create(asset.id, bob.id, CreateShareLink::default(), &ctx)
        .await
        .unwrap();

    assert_eq!(manager.list_for_asset(asset.id, admin.id).await.unwrap().len(), 2);
    let own = manager.list_for_asset(asset.id, alice.id).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].created_by, alice.id);
}
