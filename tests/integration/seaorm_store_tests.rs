//! Repository tests against the SeaORM store
//!
//! Uses a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{AssetFactory, TestDatabase, UserFactory};
    use assetgate::AccessError;
    use assetgate::audit::{AuditAction, AuditLogEntry, AuditQuery, SubjectType};
    use assetgate::auth::rbac::Permission;
    use assetgate::core::models::{RoleTemplate, UserRole};
    use assetgate::storage::{
        AssetRepository, AuditLogRepository, RoleTemplateRepository, UserRepository,
    };
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn template(role: UserRole, permissions: &[Permission]) -> RoleTemplate {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        RoleTemplate {
            id: Uuid::new_v4(),
            role,
            permissions: permissions.iter().copied().collect(),
            description: None,
            category: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn audit_entry(action: AuditAction, subject_id: &str, minutes: i64) -> AuditLogEntry {
        AuditLogEntry {
            id: Uuid::new_v4(),
            actor_user_id: None,
            action: action.as_str().to_string(),
            subject_entity_type: Some(SubjectType::ShareLink.as_str().to_string()),
            subject_entity_id: Some(subject_id.to_string()),
            metadata: json!({ "n": minutes }),
            ip_address: Some("192.0.2.1".to_string()),
            user_agent: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn test_user_round_trip() {
        let db = TestDatabase::new().await;
        let user = db
            .user(UserFactory::client().with_additional_permissions([Permission::AssetShare]))
            .await;

        let found = db.store().find_user(user.id).await.unwrap().unwrap();
        assert_eq!(found.email, user.email);
        assert_eq!(found.role, UserRole::Client);
        assert_eq!(
            found.additional_permissions,
            BTreeSet::from([Permission::AssetShare])
        );

        assert!(db.store().find_user(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_is_conflict() {
        let db = TestDatabase::new().await;
        let user = db.user(UserFactory::creator()).await;

        let result = db.store().create_user(&user).await;
        assert!(matches!(result, Err(AccessError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_set_additional_permissions() {
        let db = TestDatabase::new().await;
        let user = db.user(UserFactory::client()).await;
        let grants = BTreeSet::from([Permission::ProjectRead, Permission::TaskManage]);

        db.store()
            .set_additional_permissions(user.id, &grants)
            .await
            .unwrap();
        let found = db.store().find_user(user.id).await.unwrap().unwrap();
        assert_eq!(found.additional_permissions, grants);

        let missing = db
            .store()
            .set_additional_permissions(Uuid::new_v4(), &grants)
            .await;
        assert!(matches!(missing, Err(AccessError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_asset_round_trip() {
        let db = TestDatabase::new().await;
        let asset = db.asset(AssetFactory::with_file()).await;
        let bare = db.asset(AssetFactory::without_file()).await;

        let found = db.store().find_asset(asset.id).await.unwrap().unwrap();
        assert_eq!(found, asset);

        let found = db.store().find_asset(bare.id).await.unwrap().unwrap();
        assert!(found.file.is_none());
    }

    #[tokio::test]
    async fn test_role_template_upsert_keeps_identity() {
        let db = TestDatabase::new().await;
        let first = template(UserRole::Moderator, &[Permission::AssetRead]);
        let stored = db.store().upsert_role_template(&first).await.unwrap();
        assert_eq!(stored.id, first.id);

        let mut second = template(
            UserRole::Moderator,
            &[Permission::AssetRead, Permission::AssetApproveDownload],
        );
        second.description = Some("Reviews downloads".to_string());
        second.updated_at = first.updated_at + Duration::hours(1);

        let stored = db.store().upsert_role_template(&second).await.unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.created_at, first.created_at);
        assert_eq!(stored.updated_at, second.updated_at);
        assert_eq!(stored.permissions, second.permissions);
        assert_eq!(stored.description.as_deref(), Some("Reviews downloads"));

        assert_eq!(db.store().list_role_templates().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_role_template_delete() {
        let db = TestDatabase::new().await;
        db.store()
            .upsert_role_template(&template(UserRole::Client, &[]))
            .await
            .unwrap();

        assert!(db.store().delete_role_template(UserRole::Client).await.unwrap());
        assert!(!db.store().delete_role_template(UserRole::Client).await.unwrap());
        assert!(
            db.store()
                .find_role_template(UserRole::Client)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_audit_query_filters_and_order() {
        let db = TestDatabase::new().await;
        let link_a = Uuid::new_v4().to_string();
        let link_b = Uuid::new_v4().to_string();

        for entry in [
            audit_entry(AuditAction::ShareLinkCreated, &link_a, 0),
            audit_entry(AuditAction::ShareLinkDownloaded, &link_a, 5),
            audit_entry(AuditAction::ShareLinkDownloaded, &link_a, 10),
            audit_entry(AuditAction::ShareLinkRevoked, &link_b, 15),
        ] {
            db.store().append_audit_log(&entry).await.unwrap();
        }

        let history = db
            .store()
            .query_audit_logs(&AuditQuery::for_subject(SubjectType::ShareLink, &link_a))
            .await
            .unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].metadata, json!({ "n": 10 }));
        assert_eq!(history[2].action, "SHARE_LINK_CREATED");

        let downloads = db
            .store()
            .query_audit_logs(
                &AuditQuery::default()
                    .with_action(AuditAction::ShareLinkDownloaded)
                    .with_limit(1),
            )
            .await
            .unwrap();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].subject_entity_id.as_deref(), Some(link_a.as_str()));
        assert_eq!(downloads[0].metadata, json!({ "n": 10 }));
    }
}
