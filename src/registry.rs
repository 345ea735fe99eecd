//! Command registration against the platform.
//!
//! `PUT` replaces the full global command set, so running registration
//! repeatedly is idempotent.

use crate::errors::{Error, Result};
use serde_json::{Value, json};
use tracing::info;

const OPTION_STRING: u8 = 3;

/// The global command schema this bot serves.
#[must_use]
pub fn command_definitions() -> Value {
    json!([
        {
            "name": "lfg",
            "description": "Suggest a game to play together",
            "options": [
                {
                    "type": OPTION_STRING,
                    "name": "game_url",
                    "description": "Steam page, video link or any other url of the game",
                    "required": true
                },
                {
                    "type": OPTION_STRING,
                    "name": "game_name",
                    "description": "Title, required when the url is not a steam page",
                    "required": false
                },
                {
                    "type": OPTION_STRING,
                    "name": "image_url",
                    "description": "Image, required when none can be derived from the url",
                    "required": false
                }
            ]
        },
        {
            "name": "list",
            "description": "Show every suggested game with its current votes"
        },
        {
            "name": "poll",
            "description": "Open a scheduling poll for a game",
            "options": [
                {
                    "type": OPTION_STRING,
                    "name": "game_url",
                    "description": "Steam page, video link or any other url of the game",
                    "required": true
                },
                {
                    "type": OPTION_STRING,
                    "name": "game_name",
                    "description": "Title, required when the url is not a steam page",
                    "required": false
                },
                {
                    "type": OPTION_STRING,
                    "name": "description",
                    "description": "What the poll is about",
                    "required": false
                }
            ]
        }
    ])
}

/// Replaces the application's global command set.
pub async fn register_commands(
    client: &reqwest::Client,
    app_id: &str,
    bot_token: &str,
) -> Result<()> {
    let url = format!("https://discord.com/api/v10/applications/{app_id}/commands");
    let response = client
        .put(url)
        .header("Authorization", format!("Bot {bot_token}"))
        .json(&command_definitions())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Transport {
            message: format!("command registration failed: {status}: {body}"),
        });
    }

    info!("global commands registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_definitions_cover_every_command() {
        let definitions = command_definitions();
        let names: Vec<&str> = definitions
            .as_array()
            .unwrap()
            .iter()
            .map(|command| command["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["lfg", "list", "poll"]);
    }

    #[test]
    fn test_lfg_requires_only_the_url() {
        let definitions = command_definitions();
        let options = definitions[0]["options"].as_array().unwrap();
        assert_eq!(options[0]["name"], "game_url");
        assert_eq!(options[0]["required"], true);
        assert!(
            options[1..]
                .iter()
                .all(|option| option["required"] == false)
        );
    }
}
