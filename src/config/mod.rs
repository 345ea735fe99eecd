//! Configuration management for `PartyFinder`.
//!
//! All runtime configuration comes from environment variables (optionally
//! loaded from a `.env` file by `main`). Database bootstrap lives in
//! [`database`].

/// Database connection and table creation
pub mod database;

use crate::errors::{Error, Result};

/// Resolved application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Port the interactions endpoint listens on
    pub port: u16,
    /// SeaORM database URL
    pub database_url: String,
    /// Bot token used for channel sends, edits and deletes
    pub discord_token: String,
    /// Application id, used for webhook follow-up endpoints
    pub app_id: String,
    /// Hex-encoded Ed25519 public key for request signature checks
    pub public_key: String,
}

fn required_var(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config {
        message: format!("{name} must be set"),
    })
}

/// Loads the application configuration from the environment.
///
/// `PORT` defaults to 3000 and `DATABASE_URL` to a local SQLite file;
/// `DISCORD_TOKEN`, `APP_ID` and `PUBLIC_KEY` are required.
pub fn load_app_configuration() -> Result<AppConfig> {
    let port = match std::env::var("PORT") {
        Ok(raw) => raw.parse::<u16>().map_err(|_| Error::Config {
            message: format!("PORT must be a number, got '{raw}'"),
        })?,
        Err(_) => 3000,
    };

    Ok(AppConfig {
        port,
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/partyfinder.sqlite?mode=rwc".to_string()),
        discord_token: required_var("DISCORD_TOKEN")?,
        app_id: required_var("APP_ID")?,
        public_key: required_var("PUBLIC_KEY")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_var_is_config_error() {
        let err = required_var("PARTYFINDER_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
