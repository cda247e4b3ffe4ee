//! Configuration loading tests

#[cfg(test)]
mod tests {
    use assetgate::config::Validate;
    use assetgate::core::models::UserRole;
    use assetgate::{AccessError, AccessServices, Config, MemoryStore};
    use std::io::Write;
    use std::sync::Arc;

    const EXAMPLE: &str = include_str!("../../config/assetgate.yaml.example");

    #[test]
    fn test_example_config_is_valid() {
        let config = Config::from_yaml_str(EXAMPLE).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.locator_ttl_secs, 900);
        assert_eq!(config.sharing.top_countries, 5);
        assert_eq!(config.rbac.admin_roles, vec![UserRole::Admin]);
    }

    #[tokio::test]
    async fn test_from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.sharing.token_bytes, 32);
    }

    #[test]
    fn test_services_reject_invalid_config() {
        let mut config = Config::from_yaml_str(EXAMPLE).unwrap();
        config.storage.signing_secret = "short".to_string();

        let result = AccessServices::builder(Arc::new(MemoryStore::new()), config).build();
        assert!(matches!(result, Err(AccessError::Config(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = Config::from_yaml_str(EXAMPLE).unwrap();
        config
            .apply_env_overrides_from(|name| match name {
                "ASSETGATE_PUBLIC_BASE_URL" => Some("https://links.example.org".to_string()),
                "ASSETGATE_TOKEN_BYTES" => Some("24".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.sharing.public_base_url, "https://links.example.org");
        assert_eq!(config.sharing.token_bytes, 24);
        assert!(config.validate().is_ok());
    }
}
