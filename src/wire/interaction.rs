//! Inbound interaction payloads.
//!
//! The shape is fixed by the platform: `type` discriminates the interaction
//! kind, `data` carries the command name or component custom id, `context`
//! discriminates the guild-member vs direct-message actor shape, and
//! `message` accompanies component clicks.

use crate::errors::{Error, Result};
use crate::wire::types;
use serde::Deserialize;

/// The closed set of interaction kinds this bot dispatches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    /// Endpoint verification handshake
    Ping,
    /// Slash command invocation
    Command,
    /// Button/select click
    Component,
    /// Modal form submission
    ModalSubmit,
}

impl TryFrom<u8> for InteractionKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            types::INTERACTION_PING => Ok(Self::Ping),
            types::INTERACTION_COMMAND => Ok(Self::Command),
            types::INTERACTION_COMPONENT => Ok(Self::Component),
            types::INTERACTION_MODAL_SUBMIT => Ok(Self::ModalSubmit),
            value => Err(Error::UnknownInteractionType { value }),
        }
    }
}

/// A platform user.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Snowflake user id
    pub id: String,
    /// Display name, if set
    pub global_name: Option<String>,
    /// Account name
    pub username: Option<String>,
}

impl User {
    /// Best available display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(self.id.as_str())
    }
}

/// Guild membership wrapper around a user.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Member {
    /// The member's user record
    pub user: User,
}

/// A name/value pair from a command invocation.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CommandOption {
    /// Option name as registered in the command schema
    pub name: String,
    /// Option value (all of ours are strings)
    pub value: serde_json::Value,
}

/// A submitted modal field.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ModalField {
    /// Field identifier from the modal spec
    pub custom_id: String,
    /// Submitted value
    pub value: Option<String>,
}

/// One row of a submitted modal.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ModalRow {
    /// Fields in the row
    #[serde(default)]
    pub components: Vec<ModalField>,
}

/// The `data` object of a command, component or modal interaction.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct InteractionData {
    /// Command name (commands only)
    pub name: Option<String>,
    /// Component or modal identifier (components and modals)
    pub custom_id: Option<String>,
    /// Command options (commands only)
    #[serde(default)]
    pub options: Vec<CommandOption>,
    /// Submitted rows (modals only)
    #[serde(default)]
    pub components: Vec<ModalRow>,
}

/// The message a clicked component lives on.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MessageStub {
    /// Message id
    pub id: String,
}

/// A parsed inbound interaction.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Interaction {
    /// Interaction id
    pub id: String,
    /// Short-lived token for webhook follow-ups
    #[serde(default)]
    pub token: String,
    /// Raw interaction type
    #[serde(rename = "type")]
    pub kind: u8,
    /// Payload data, absent for pings
    pub data: Option<InteractionData>,
    /// Actor in guild context
    pub member: Option<Member>,
    /// Actor in direct-message context
    pub user: Option<User>,
    /// 0 = guild, other values = user contexts
    pub context: Option<u8>,
    /// The message a component click came from
    pub message: Option<MessageStub>,
}

impl Interaction {
    /// Classifies the raw type into the closed kind set.
    pub fn classify(&self) -> Result<InteractionKind> {
        InteractionKind::try_from(self.kind)
    }

    /// The acting user: the member wrapper in guild context, the bare user
    /// otherwise.
    #[must_use]
    pub fn actor(&self) -> Option<&User> {
        if self.context == Some(0) {
            self.member.as_ref().map(|member| &member.user)
        } else {
            self.user
                .as_ref()
                .or_else(|| self.member.as_ref().map(|member| &member.user))
        }
    }

    /// A command option's string value.
    #[must_use]
    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .options
            .iter()
            .find(|option| option.name == name)?
            .value
            .as_str()
    }

    /// A submitted modal field's value, searched across all rows.
    #[must_use]
    pub fn modal_field(&self, custom_id: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .components
            .iter()
            .flat_map(|row| &row.components)
            .find(|field| field.custom_id == custom_id)?
            .value
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_command_payload() {
        let raw = serde_json::json!({
            "id": "123",
            "token": "tok",
            "type": 2,
            "context": 0,
            "member": { "user": { "id": "u1", "global_name": "Alice" } },
            "data": {
                "name": "lfg",
                "options": [
                    { "name": "game_url", "value": "https://store.steampowered.com/app/1/X/" }
                ]
            }
        });

        let interaction: Interaction = serde_json::from_value(raw).unwrap();
        assert_eq!(interaction.classify().unwrap(), InteractionKind::Command);
        assert_eq!(interaction.actor().unwrap().id, "u1");
        assert_eq!(interaction.actor().unwrap().display_name(), "Alice");
        assert_eq!(
            interaction.option_str("game_url"),
            Some("https://store.steampowered.com/app/1/X/")
        );
        assert_eq!(interaction.option_str("missing"), None);
    }

    #[test]
    fn test_parse_modal_payload() {
        let raw = serde_json::json!({
            "id": "9",
            "type": 5,
            "context": 1,
            "user": { "id": "u2" },
            "data": {
                "custom_id": "time_modal_4",
                "components": [
                    { "components": [ { "custom_id": "start_time", "value": "2026-09-04 18:30" } ] },
                    { "components": [ { "custom_id": "end_time", "value": "2026-09-04 20:30" } ] }
                ]
            }
        });

        let interaction: Interaction = serde_json::from_value(raw).unwrap();
        assert_eq!(interaction.classify().unwrap(), InteractionKind::ModalSubmit);
        assert_eq!(interaction.actor().unwrap().id, "u2");
        assert_eq!(interaction.modal_field("start_time"), Some("2026-09-04 18:30"));
        assert_eq!(interaction.modal_field("end_time"), Some("2026-09-04 20:30"));
        assert_eq!(interaction.modal_field("other"), None);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let raw = serde_json::json!({ "id": "1", "type": 11 });
        let interaction: Interaction = serde_json::from_value(raw).unwrap();
        let err = interaction.classify().unwrap_err();
        assert!(matches!(err, Error::UnknownInteractionType { value: 11 }));
    }
}
