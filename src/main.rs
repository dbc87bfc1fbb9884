use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::bail;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use folio::auth::{Argon2Hasher, generate_password};
use folio::config::{ConfigOverrides, ENVIRONMENT_VAR, ServerConfig};
use folio::server::{AppState, create_router};
use folio::store::seed::seed_defaults;
use folio::store::{SqliteStore, Store};
use folio::types::Environment;

const MIN_PASSWORD_LEN: usize = 6;

#[cfg(unix)]
fn set_restrictive_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Failed to set permissions on {}: {e}", path.display());
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "A portfolio backend with SEO controls", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database and uploads
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Public base URL for external access (e.g., "https://folio.example.com").
        /// Used for sitemap and robots links. If not set, URLs are derived from request headers.
        #[arg(long)]
        public_base_url: Option<String>,

        /// Deployment environment: production or staging
        #[arg(long, value_parser = parse_environment)]
        environment: Option<Environment>,

        /// TOML config file (defaults to <data-dir>/folio.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Initialize the server (create database, default content and admin user)
    Init {
        /// Data directory for the database and uploads
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Admin username
        #[arg(long, default_value = "admin")]
        username: String,

        /// Generate the password instead of prompting for it
        #[arg(long)]
        non_interactive: bool,
    },

    /// Replace the admin password
    ResetPassword {
        /// Data directory for the database and uploads
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Generate the password instead of prompting for it
        #[arg(long)]
        non_interactive: bool,
    },
}

fn parse_environment(value: &str) -> Result<Environment, String> {
    Environment::parse(value).ok_or_else(|| format!("unknown environment '{value}'"))
}

fn prompt_password() -> anyhow::Result<String> {
    let password = inquire::Password::new("Admin password:")
        .with_validator(|input: &str| {
            if input.chars().count() < MIN_PASSWORD_LEN {
                Err(format!("Password must be at least {MIN_PASSWORD_LEN} characters").into())
            } else {
                Ok(inquire::validator::Validation::Valid)
            }
        })
        .prompt()?;
    Ok(password)
}

/// Prompts, or generates a password and writes it to the secret file.
fn obtain_password(data_path: &Path, non_interactive: bool) -> anyhow::Result<String> {
    if !non_interactive {
        return prompt_password();
    }

    let password = generate_password();
    let password_file = ServerConfig {
        data_dir: data_path.to_path_buf(),
        ..Default::default()
    }
    .admin_password_path();

    fs::write(&password_file, &password)?;

    #[cfg(unix)]
    set_restrictive_permissions(&password_file);

    println!();
    println!("========================================");
    println!("Admin password (save this, it won't be shown again):");
    println!();
    println!("  {password}");
    println!();
    println!("Password also written to: {}", password_file.display());
    println!("========================================");
    println!();

    Ok(password)
}

fn open_store(data_path: &Path) -> anyhow::Result<SqliteStore> {
    let config = ServerConfig {
        data_dir: data_path.to_path_buf(),
        ..Default::default()
    };
    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;
    Ok(store)
}

fn run_init(data_path: PathBuf, username: String, non_interactive: bool) -> anyhow::Result<()> {
    let username = username.trim().to_string();
    if username.is_empty() {
        bail!("Username cannot be empty");
    }

    fs::create_dir_all(&data_path)?;
    let store = open_store(&data_path)?;

    if store.has_admin_user()? {
        bail!(
            "Server already initialized. Use 'folio admin reset-password' to change the admin password."
        );
    }

    let password = obtain_password(&data_path, non_interactive)?;
    let hash = Argon2Hasher::new().hash(&password)?;
    store.create_admin_user(&username, &hash)?;
    seed_defaults(&store)?;

    println!("Initialized {} with admin user '{username}'", data_path.display());

    Ok(())
}

fn run_reset_password(data_path: PathBuf, non_interactive: bool) -> anyhow::Result<()> {
    let store = open_store(&data_path)?;

    let Some(admin) = store.get_first_admin_user()? else {
        bail!("Server not initialized. Run 'folio admin init' first.");
    };

    let password = obtain_password(&data_path, non_interactive)?;
    let hash = Argon2Hasher::new().hash(&password)?;
    store.update_admin_password(admin.id, &hash)?;

    println!("Password updated for admin user '{}'", admin.username);

    Ok(())
}

async fn run_serve(overrides: ConfigOverrides) -> anyhow::Result<()> {
    let env_value = std::env::var(ENVIRONMENT_VAR).ok();
    let config = ServerConfig::resolve(overrides, env_value.as_deref())?;

    if !config.db_path().exists() {
        bail!("Server not initialized. Run 'folio admin init' first to create the database and admin user.");
    }

    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;
    if !store.has_admin_user()? {
        bail!("Server not initialized. Run 'folio admin init' first to create the database and admin user.");
    }

    seed_defaults(&store)?;

    let purged = store.delete_expired_sessions(Utc::now())?;
    if purged > 0 {
        info!("Purged {purged} expired sessions");
    }

    let addr = config.socket_addr()?;
    info!("Environment: {}", config.environment);

    let store: Arc<dyn Store> = Arc::new(store);
    let state = Arc::new(AppState::new(store.clone(), config));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    store.close()?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("folio=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                username,
                non_interactive,
            } => {
                run_init(data_dir, username, non_interactive)?;
            }
            AdminCommands::ResetPassword {
                data_dir,
                non_interactive,
            } => {
                run_reset_password(data_dir, non_interactive)?;
            }
        },
        Commands::Serve {
            host,
            port,
            data_dir,
            public_base_url,
            environment,
            config,
        } => {
            run_serve(ConfigOverrides {
                host,
                port,
                data_dir: Some(data_dir),
                public_base_url,
                environment,
                config_file: config,
            })
            .await?;
        }
    }

    Ok(())
}
