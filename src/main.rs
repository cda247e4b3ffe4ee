//! assetgate - access-control and secure-sharing core
//!
//! Operator CLI: run migrations, validate configuration, print the permission catalog

#![allow(missing_docs)]

use anyhow::Context;
use assetgate::Config;
use assetgate::auth::rbac::{default_role_permissions, permissions_by_category};
use assetgate::core::models::UserRole;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "assetgate", version, about = "Access-control and secure-sharing core")]
struct Cli {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, env = "ASSETGATE_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending database migrations
    Migrate,
    /// Load and validate the configuration, then exit
    CheckConfig,
    /// Print the permission catalog and the default permissions of every role
    Catalog {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::Catalog { format } = cli.command {
        return print_catalog(format);
    }

    let config = load_config(cli.config.as_ref()).await?;
    assetgate::utils::logging::init_tracing(&config.logging)
        .context("Failed to initialize logging")?;

    match cli.command {
        Command::Migrate => migrate(&config).await,
        Command::CheckConfig => {
            info!(
                "Configuration is valid (database: {}, admin roles: {:?})",
                redact_url(&config.database.url),
                config.rbac.admin_roles
            );
            println!("Configuration OK");
            Ok(())
        }
        Command::Catalog { .. } => Ok(()),
    }
}

async fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::from_env().context("Failed to load configuration from environment")?,
    };
    Ok(config)
}

#[cfg(any(feature = "sqlite", feature = "postgres"))]
async fn migrate(config: &Config) -> anyhow::Result<()> {
    let store = assetgate::SeaOrmStore::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let pending = store.pending_migrations().await?;
    if pending.is_empty() {
        info!("Database schema is up to date");
        return Ok(());
    }

    info!("Applying {} migration(s): {}", pending.len(), pending.join(", "));
    store.migrate().await.context("Migration failed")?;
    info!("Migrations applied");
    Ok(())
}

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
async fn migrate(_config: &Config) -> anyhow::Result<()> {
    anyhow::bail!("assetgate was built without a database backend (enable `sqlite` or `postgres`)")
}

fn print_catalog(format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (category, permissions) in permissions_by_category() {
                println!("{}", category.label());
                for permission in permissions {
                    println!("  {:<26} {}", permission.as_str(), permission.description());
                }
            }
            println!();
            println!("Role defaults");
            for role in UserRole::ALL {
                let names: Vec<&str> = default_role_permissions(role)
                    .iter()
                    .map(|p| p.as_str())
                    .collect();
                println!("  {:<16} {}", role.as_str(), names.join(", "));
            }
        }
        OutputFormat::Json => {
            let categories: Vec<_> = permissions_by_category()
                .into_iter()
                .map(|(category, permissions)| {
                    json!({
                        "category": category,
                        "label": category.label(),
                        "permissions": permissions
                            .iter()
                            .map(|p| json!({ "name": p.as_str(), "description": p.description() }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            let roles: serde_json::Map<String, serde_json::Value> = UserRole::ALL
                .into_iter()
                .map(|role| (role.as_str().to_string(), json!(default_role_permissions(role))))
                .collect();
            let output = json!({ "categories": categories, "role_defaults": roles });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Strip credentials from a database URL before logging it
fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) if parsed.password().is_some() => {
            let _ = parsed.set_password(Some("****"));
            parsed.to_string()
        }
        _ => raw.to_string(),
    }
}
