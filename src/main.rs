use dotenvy::dotenv;
use partyfinder::config::{self, database};
use partyfinder::errors::Result;
use partyfinder::http::{ServerState, app};
use partyfinder::resolver::HttpResolver;
use partyfinder::router::AppContext;
use partyfinder::transport::HttpTransport;
use partyfinder::verify;
use std::sync::Arc;
use tracing::info;
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
    let public_key = verify::parse_public_key(&app_config.public_key)?;

    let db = database::create_connection(&app_config.database_url).await?;
    database::create_tables(&db).await?;
    info!("database initialized");

    let client = reqwest::Client::new();
    let ctx = AppContext::new(
        db,
        Arc::new(HttpTransport::new(
            client.clone(),
            app_config.app_id.clone(),
            app_config.discord_token.clone(),
        )),
        Arc::new(HttpResolver::new(client)),
    );
    let state = ServerState { ctx, public_key };

    let listener =
        tokio::net::TcpListener::bind(("0.0.0.0", app_config.port)).await?;
    info!(port = app_config.port, "interactions endpoint listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
