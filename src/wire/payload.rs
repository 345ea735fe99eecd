//! Outbound payload tree - response envelopes, Components V2 trees, embeds.
//!
//! All of these are plain data: the composer builds them, the transport
//! serializes them. Constructors pin the numeric `type` discriminators so
//! the rest of the crate never touches raw component type codes.

use super::types;
use serde::Serialize;

/// A text block component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextDisplay {
    #[serde(rename = "type")]
    kind: u8,
    /// Markdown content of the block
    pub content: String,
}

impl TextDisplay {
    /// Creates a text display block.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            kind: types::COMPONENT_TEXT_DISPLAY,
            content: content.into(),
        }
    }
}

/// One image inside a media gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    /// The image reference
    pub media: UnfurledMedia,
}

/// A url-addressed media resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnfurledMedia {
    /// Image url
    pub url: String,
}

/// A media gallery component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MediaGallery {
    #[serde(rename = "type")]
    kind: u8,
    /// Gallery entries
    pub items: Vec<MediaItem>,
}

impl MediaGallery {
    /// Creates a gallery with a single image.
    pub fn single(url: impl Into<String>) -> Self {
        Self {
            kind: types::COMPONENT_MEDIA_GALLERY,
            items: vec![MediaItem {
                media: UnfurledMedia { url: url.into() },
            }],
        }
    }
}

/// A clickable button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    kind: u8,
    /// Encoded action identifier
    pub custom_id: String,
    /// Visible label
    pub label: String,
    /// Visual style
    pub style: u8,
}

impl Button {
    /// Creates a button with the given action id, label and style.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: u8) -> Self {
        Self {
            kind: types::COMPONENT_BUTTON,
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        }
    }
}

/// A single-line text input, used in modals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextInput {
    #[serde(rename = "type")]
    kind: u8,
    /// Field identifier used to extract the submitted value
    pub custom_id: String,
    /// Visible field label
    pub label: String,
    /// Input style (always short here)
    pub style: u8,
    /// Hint text shown while empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether submission requires a value
    pub required: bool,
}

impl TextInput {
    /// Creates a required short text input.
    pub fn short(
        custom_id: impl Into<String>,
        label: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            kind: types::COMPONENT_TEXT_INPUT,
            custom_id: custom_id.into(),
            label: label.into(),
            style: types::TEXT_INPUT_SHORT,
            placeholder: Some(placeholder.into()),
            required: true,
        }
    }
}

/// Anything that can sit inside an action row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowItem {
    /// A button
    Button(Button),
    /// A text input (modals only)
    TextInput(TextInput),
}

/// A horizontal row of interactive components.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    kind: u8,
    /// Row contents, at most five buttons
    pub components: Vec<RowItem>,
}

impl ActionRow {
    /// Creates a row of buttons.
    #[must_use]
    pub fn buttons(buttons: Vec<Button>) -> Self {
        Self {
            kind: types::COMPONENT_ACTION_ROW,
            components: buttons.into_iter().map(RowItem::Button).collect(),
        }
    }

    /// Creates a row holding one modal text input.
    #[must_use]
    pub fn input(input: TextInput) -> Self {
        Self {
            kind: types::COMPONENT_ACTION_ROW,
            components: vec![RowItem::TextInput(input)],
        }
    }
}

/// One node of the declarative message component tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Component {
    /// A text block
    Text(TextDisplay),
    /// A media gallery
    Gallery(MediaGallery),
    /// A row of buttons
    Row(ActionRow),
}

/// A classic embed field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    /// Field title
    pub name: String,
    /// Field body
    pub value: String,
    /// Whether fields share a line
    pub inline: bool,
}

/// A classic embed (used by the list summary).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Embed {
    /// Embed title
    pub title: String,
    /// Accent color
    pub color: u32,
    /// Embed fields, one per game
    pub fields: Vec<EmbedField>,
}

/// A complete message body, used both for responses and for edits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    /// Plain text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Message flags (ephemeral, Components V2)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
    /// Component tree
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    /// Embeds
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl MessagePayload {
    /// A plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Marks the message as visible only to the requesting user.
    #[must_use]
    pub fn ephemeral(mut self) -> Self {
        let flags = match self.flags {
            Some(flags) => flags | types::FLAG_EPHEMERAL,
            None => types::FLAG_EPHEMERAL,
        };
        self.flags = Some(flags);
        self
    }

    /// Every text display block in the tree, in order. Test/inspection aid.
    #[must_use]
    pub fn text_blocks(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter_map(|component| match component {
                Component::Text(text) => Some(text.content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every button in the tree, in order. Test/inspection aid.
    #[must_use]
    pub fn buttons(&self) -> Vec<&Button> {
        self.components
            .iter()
            .filter_map(|component| match component {
                Component::Row(row) => Some(&row.components),
                _ => None,
            })
            .flatten()
            .filter_map(|item| match item {
                RowItem::Button(button) => Some(button),
                RowItem::TextInput(_) => None,
            })
            .collect()
    }
}

/// A modal form specification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Modal {
    /// Encoded form identifier
    pub custom_id: String,
    /// Form title
    pub title: String,
    /// One row per input field
    pub components: Vec<ActionRow>,
}

/// The data half of a response envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// A message body
    Message(MessagePayload),
    /// A modal form
    Modal(Modal),
}

/// The typed response envelope returned from the interactions endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope {
    /// Response type discriminator
    #[serde(rename = "type")]
    pub kind: u8,
    /// Response body, absent for acknowledgment-only types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl ResponseEnvelope {
    /// Handshake acknowledgment.
    #[must_use]
    pub const fn pong() -> Self {
        Self {
            kind: types::RESPONSE_PONG,
            data: None,
        }
    }

    /// An immediate message response.
    #[must_use]
    pub fn channel_message(payload: MessagePayload) -> Self {
        Self {
            kind: types::RESPONSE_CHANNEL_MESSAGE,
            data: Some(ResponseData::Message(payload)),
        }
    }

    /// A deferred message; the follow-up fills it in.
    #[must_use]
    pub const fn deferred_channel_message() -> Self {
        Self {
            kind: types::RESPONSE_DEFERRED_CHANNEL_MESSAGE,
            data: None,
        }
    }

    /// Silent acknowledgment of a component click.
    #[must_use]
    pub const fn deferred_update() -> Self {
        Self {
            kind: types::RESPONSE_DEFERRED_UPDATE_MESSAGE,
            data: None,
        }
    }

    /// Opens a modal form.
    #[must_use]
    pub fn modal(modal: Modal) -> Self {
        Self {
            kind: types::RESPONSE_MODAL,
            data: Some(ResponseData::Modal(modal)),
        }
    }

    /// A private text reply to the requesting user.
    pub fn ephemeral_text(content: impl Into<String>) -> Self {
        Self::channel_message(MessagePayload::text(content).ephemeral())
    }
}
