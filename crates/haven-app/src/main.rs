//! Haven CLI entry point: builds the controller with its production
//! collaborators, runs the boot-time session resume, and reports where
//! the application landed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use haven_app::api_client::{build_http_client, HttpUserApi, HttpVaultApi};
use haven_app::config::AppConfig;
use haven_app::controller::AppController;
use haven_app::mailer::EmailJsMailer;
use haven_app::notify::LogNotifier;
use haven_app::secure_storage::KeyringTokenStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "Haven credential vault client", long_about = None)]
struct Cli {
    /// User service base URL
    #[arg(long, env = "HAVEN_USER_API_URL")]
    user_api_url: Option<String>,
    /// Vault service base URL
    #[arg(long, env = "HAVEN_VAULT_API_URL")]
    vault_api_url: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long, env = "HAVEN_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = AppConfig::default();
    if let Some(url) = cli.user_api_url {
        config.user_api_url = url;
    }
    if let Some(url) = cli.vault_api_url {
        config.vault_api_url = url;
    }
    if let Some(secs) = cli.request_timeout_secs {
        config.request_timeout_secs = secs;
    }

    let http = build_http_client(Duration::from_secs(config.request_timeout_secs));
    let mut controller = AppController::new(
        Arc::new(HttpUserApi::new(http.clone(), config.user_api_url.clone())),
        Arc::new(HttpVaultApi::new(http.clone(), config.vault_api_url.clone())),
        Arc::new(EmailJsMailer::new(http, &config.mail)),
        Arc::new(KeyringTokenStore),
        Arc::new(LogNotifier),
    );

    controller.resume_session().await;
    info!("screen: {:?}", controller.screen());
    if let Some(profile) = controller.profile() {
        info!("signed in as {} <{}>", profile.name, profile.email);
        info!("{} vault item(s) loaded", controller.items().len());
    }
    Ok(())
}
