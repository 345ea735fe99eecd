//! One-shot command registration tool.
//!
//! Run once per command schema change: `cargo run --bin register_commands`.

use dotenvy::dotenv;
use partyfinder::config;
use partyfinder::errors::Result;
use partyfinder::registry;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv().ok();

    let app_config = config::load_app_configuration()?;
    let client = reqwest::Client::new();
    registry::register_commands(&client, &app_config.app_id, &app_config.discord_token).await
}
