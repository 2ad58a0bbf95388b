use cartbot_core::Location;
use cartbot_messenger::{EventPayload, InboundEvent};

/// Exact texts that act as commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommand {
    /// `get_location`: ask the user to share a location.
    GetLocation,
    /// `login`: offer the account-link button.
    Login,
}

impl TextCommand {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "get_location" => Some(Self::GetLocation),
            "login" => Some(Self::Login),
            _ => None,
        }
    }
}

/// The branch an inbound event is handled by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind<'a> {
    /// Raw postback payload, not yet decoded.
    Postback(&'a str),
    /// Account-link authorization code.
    AccountLink(&'a str),
    /// First coordinate pair found among the message attachments.
    LocationAttachment(Location),
    /// A recognised command typed as the whole message.
    TextCommand(TextCommand),
    /// Any other message text, possibly empty.
    FreeText(&'a str),
}

/// Decide which branch handles `event`.
///
/// Order: postback, account-link code, location attachment, text command,
/// free text. An account-link callback without a code is treated as empty
/// free text.
pub fn classify(event: &InboundEvent) -> EventKind<'_> {
    match &event.payload {
        EventPayload::Postback(postback) => EventKind::Postback(&postback.payload),
        EventPayload::AccountLink(linking) => match linking.authorization_code.as_deref() {
            Some(code) => EventKind::AccountLink(code),
            None => EventKind::FreeText(""),
        },
        EventPayload::Message(message) => {
            if let Some(location) = message.coordinates() {
                return EventKind::LocationAttachment(location);
            }
            let text = message.text();
            match TextCommand::from_text(text) {
                Some(command) => EventKind::TextCommand(command),
                None => EventKind::FreeText(text),
            }
        }
    }
}

/// Text of a message event, or `""` for other payloads.
pub fn message_text(event: &InboundEvent) -> &str {
    match &event.payload {
        EventPayload::Message(message) => message.text(),
        _ => "",
    }
}
