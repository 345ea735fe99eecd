//! Discord wire format - the fixed external interface this core must parse
//! and produce.
//!
//! [`interaction`] models the inbound signed callback payload; [`payload`]
//! models the outbound response envelopes and Components V2 message trees.

/// Inbound interaction payloads
pub mod interaction;
/// Outbound response envelopes, components and embeds
pub mod payload;

/// Numeric constants of the interaction protocol.
pub mod types {
    /// Inbound: verification ping
    pub const INTERACTION_PING: u8 = 1;
    /// Inbound: slash command invocation
    pub const INTERACTION_COMMAND: u8 = 2;
    /// Inbound: button/select click
    pub const INTERACTION_COMPONENT: u8 = 3;
    /// Inbound: modal form submission
    pub const INTERACTION_MODAL_SUBMIT: u8 = 5;

    /// Outbound: pong acknowledgment
    pub const RESPONSE_PONG: u8 = 1;
    /// Outbound: message with content
    pub const RESPONSE_CHANNEL_MESSAGE: u8 = 4;
    /// Outbound: deferred message, filled in by a follow-up
    pub const RESPONSE_DEFERRED_CHANNEL_MESSAGE: u8 = 5;
    /// Outbound: acknowledge a component click without visible change
    pub const RESPONSE_DEFERRED_UPDATE_MESSAGE: u8 = 6;
    /// Outbound: open a modal form
    pub const RESPONSE_MODAL: u8 = 9;

    /// Message flag: visible only to the requesting user
    pub const FLAG_EPHEMERAL: u32 = 1 << 6;
    /// Message flag: the payload uses the Components V2 layout
    pub const FLAG_IS_COMPONENTS_V2: u32 = 1 << 15;

    /// Component type: action row
    pub const COMPONENT_ACTION_ROW: u8 = 1;
    /// Component type: button
    pub const COMPONENT_BUTTON: u8 = 2;
    /// Component type: text input (modals only)
    pub const COMPONENT_TEXT_INPUT: u8 = 4;
    /// Component type: text display block
    pub const COMPONENT_TEXT_DISPLAY: u8 = 10;
    /// Component type: media gallery
    pub const COMPONENT_MEDIA_GALLERY: u8 = 12;

    /// Button style: primary (blurple)
    pub const BUTTON_PRIMARY: u8 = 1;
    /// Button style: success (green)
    pub const BUTTON_SUCCESS: u8 = 3;
    /// Button style: danger (red)
    pub const BUTTON_DANGER: u8 = 4;

    /// Text input style: single line
    pub const TEXT_INPUT_SHORT: u8 = 1;
}
