use clap::Parser;
use parish_admin::{commands::SettingsCommand, errors::Error, HttpSettingsClient};
use secrecy::SecretString;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// parish-admin: Edit the parish website settings
#[derive(Parser)]
#[command(name = "parish-admin")]
#[command(about = "Edit the parish website settings", long_about = None)]
struct Cli {
    /// Base URL of the settings API
    #[arg(long, env = "PARISH_API_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Admin password
    #[arg(long, env = "PARISH_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: SettingsCommand,
}

async fn run(cli: Cli) -> Result<String, Error> {
    let mut client = HttpSettingsClient::new(&cli.base_url)?;
    client
        .login(&SecretString::from(cli.password))
        .await
        .map_err(|e| Error::Auth(e.to_string()))?;

    let result = parish_admin::commands::execute(&cli.command, &client).await;

    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "Logout failed");
    }
    result
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("PARISH_ADMIN_LOG"))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            error!("Error: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
