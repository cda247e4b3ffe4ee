//! Test fixtures and data factories
//!
//! All factories create real domain objects, not mocks.

use assetgate::Config;
use assetgate::audit::AccessContext;
use assetgate::core::models::{Asset, AssetFile, User, UserRole};
use uuid::Uuid;

/// Configuration accepted by `AccessServices::build`
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.database.max_connections = 1;
    config.storage.base_url = "https://objects.example.com/media".to_string();
    config.storage.signing_secret = "integration-signing-secret".to_string();
    config.sharing.public_base_url = "https://share.example.com".to_string();
    config
}

/// Request metadata of an anonymous recipient
pub fn request_context() -> AccessContext {
    AccessContext::new()
        .ip("198.51.100.23")
        .user_agent("integration-test/1.0")
        .referrer("https://mail.example.com/")
        .country("DE")
}

/// Factory for creating test users
pub struct UserFactory;

impl UserFactory {
    /// Create a user with the given role and a unique email
    pub fn with_role(role: UserRole) -> User {
        let suffix = &Uuid::new_v4().to_string()[..8];
        let mut user = User::new(format!("{}-{}@example.com", role.as_str().to_lowercase(), suffix), role);
        user.display_name = Some(format!("Test {}", role.as_str()));
        user
    }

    pub fn admin() -> User {
        Self::with_role(UserRole::Admin)
    }

    pub fn creator() -> User {
        Self::with_role(UserRole::ContentCreator)
    }

    pub fn client() -> User {
        Self::with_role(UserRole::Client)
    }
}

/// Factory for creating test assets
pub struct AssetFactory;

impl AssetFactory {
    /// Asset with an uploaded file
    pub fn with_file() -> Asset {
        let mut file = AssetFile::new("campaigns/2025/launch-deck.pdf", "Launch Deck.pdf");
        file.content_type = Some("application/pdf".to_string());
        file.size_bytes = Some(1_048_576);

        let mut asset = Asset::new("Launch deck").with_file(file);
        asset.description = Some("Spring campaign presentation".to_string());
        asset
    }

    /// Asset whose file has not been uploaded yet
    pub fn without_file() -> Asset {
        Asset::new("Pending upload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetgate::config::Validate;

    #[test]
    fn test_config_is_valid() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_user_factory_emails_are_unique() {
        let first = UserFactory::creator();
        let second = UserFactory::creator();
        assert_ne!(first.email, second.email);
        assert_eq!(first.role, UserRole::ContentCreator);
    }

    #[test]
    fn test_asset_factory() {
        assert!(AssetFactory::with_file().file.is_some());
        assert!(AssetFactory::without_file().file.is_none());
    }
}
