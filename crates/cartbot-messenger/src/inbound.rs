use cartbot_core::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Webhook wire types ──────────────────────────────────────────────────────

/// Webhook request body: `{object, entry: [{id, time, messaging: [..]}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Callback {
    /// `"page"` for Messenger events.
    #[serde(default)]
    pub object: String,
    /// One entry per page in the batch.
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// One page entry in a webhook batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    /// Page id.
    #[serde(default)]
    pub id: String,
    /// Batch time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: i64,
    /// Events for this page.
    #[serde(default)]
    pub messaging: Vec<Messaging>,
}

/// A raw messaging event as delivered by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Messaging {
    /// The user.
    #[serde(default)]
    pub sender: User,
    /// The page.
    #[serde(default)]
    pub recipient: User,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
    /// Text, quick reply or attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Button click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<Postback>,
    /// Account link or unlink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_linking: Option<AccountLinking>,
}

/// A page-scoped participant id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// Page-scoped id.
    #[serde(default)]
    pub id: String,
}

/// Raw message payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Platform message id.
    #[serde(default)]
    pub mid: Option<String>,
    /// Typed text.
    #[serde(default)]
    pub text: Option<String>,
    /// Set on copies of messages the page itself sent.
    #[serde(default)]
    pub is_echo: bool,
    /// The quick reply the user tapped.
    #[serde(default)]
    pub quick_reply: Option<QuickReplyEcho>,
    /// Quick replies offered, on echoes.
    #[serde(default)]
    pub quick_replies: Vec<QuickReplyEcho>,
    /// Attachments, in order.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Single-attachment form sent by older clients.
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// Payload of a quick reply the user tapped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuickReplyEcho {
    /// `"text"` or `"location"`.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Developer payload of the quick reply.
    #[serde(default)]
    pub payload: Option<String>,
}

/// A message attachment. Location shares carry `payload.coordinates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// `"location"`, `"image"`, `"fallback"` and so on.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Type-specific content.
    #[serde(default)]
    pub payload: AttachmentPayload,
}

/// Content of an attachment. Only the fields the bot reads are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentPayload {
    /// Media or fallback link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Present on location shares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// A shared position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub long: f64,
}

impl From<Coordinates> for Location {
    fn from(c: Coordinates) -> Self {
        Location::new(c.lat, c.long)
    }
}

/// A button click carrying its action token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Postback {
    /// Label of the clicked button.
    #[serde(default)]
    pub title: String,
    /// Action token the button carried.
    #[serde(default)]
    pub payload: String,
}

/// Account-link callback. `authorization_code` is absent on unlink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountLinking {
    /// Code issued by the login page.
    #[serde(default)]
    pub authorization_code: Option<String>,
    /// `"linked"` or `"unlinked"`.
    #[serde(default)]
    pub status: String,
}

// ── Domain event ────────────────────────────────────────────────────────────

/// A user event with exactly one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    /// The user; replies go here.
    pub sender_id: String,
    /// The page that received the event.
    pub recipient_id: String,
    /// Milliseconds since the Unix epoch, as sent by the platform.
    pub timestamp: i64,
    /// What the user did.
    pub payload: EventPayload,
}

/// The single payload of an [`InboundEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Text, quick reply or attachments.
    Message(MessagePayload),
    /// Button click.
    Postback(Postback),
    /// Account link or unlink.
    AccountLink(AccountLinking),
}

/// A text and/or attachment message from the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePayload {
    /// Platform message id.
    pub mid: Option<String>,
    /// Typed text.
    pub text: Option<String>,
    /// Payload of the quick reply the user tapped, if any.
    pub quick_reply: Option<String>,
    /// Attachments, in order.
    pub attachments: Vec<Attachment>,
}

impl MessagePayload {
    /// First coordinate pair found among the attachments.
    pub fn coordinates(&self) -> Option<Location> {
        self.attachments
            .iter()
            .find_map(|a| a.payload.coordinates)
            .map(Location::from)
    }

    /// Typed text, or `""`.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

impl InboundEvent {
    /// When the user sent the event.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// A text message event, mostly useful in tests.
    pub fn text(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::message(
            sender_id,
            MessagePayload {
                text: Some(text.into()),
                ..MessagePayload::default()
            },
        )
    }

    /// A postback event carrying `payload` as its action token.
    pub fn postback(sender_id: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::with_payload(
            sender_id,
            EventPayload::Postback(Postback {
                title: String::new(),
                payload: payload.into(),
            }),
        )
    }

    /// A location share.
    pub fn location(sender_id: impl Into<String>, location: Location) -> Self {
        Self::message(
            sender_id,
            MessagePayload {
                attachments: vec![Attachment {
                    kind: "location".into(),
                    payload: AttachmentPayload {
                        url: None,
                        coordinates: Some(Coordinates {
                            lat: location.latitude,
                            long: location.longitude,
                        }),
                    },
                }],
                ..MessagePayload::default()
            },
        )
    }

    /// An account-link callback with the given authorization code.
    pub fn account_linked(sender_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self::with_payload(
            sender_id,
            EventPayload::AccountLink(AccountLinking {
                authorization_code: Some(code.into()),
                status: "linked".into(),
            }),
        )
    }

    fn message(sender_id: impl Into<String>, message: MessagePayload) -> Self {
        Self::with_payload(sender_id, EventPayload::Message(message))
    }

    fn with_payload(sender_id: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            sender_id: sender_id.into(),
            recipient_id: String::new(),
            timestamp: Utc::now().timestamp_millis(),
            payload,
        }
    }
}

impl Messaging {
    /// Convert to an [`InboundEvent`].
    ///
    /// Returns `None` for events the bot does not act on: delivery and read
    /// receipts, and echoes of the page's own messages. When several payloads
    /// are present, postback wins over account-link, which wins over message.
    pub fn into_event(self) -> Option<InboundEvent> {
        let payload = if let Some(postback) = self.postback {
            EventPayload::Postback(postback)
        } else if let Some(linking) = self.account_linking {
            EventPayload::AccountLink(linking)
        } else if let Some(message) = self.message {
            if message.is_echo {
                return None;
            }
            let mut attachments = message.attachments;
            attachments.extend(message.attachment);
            EventPayload::Message(MessagePayload {
                mid: message.mid,
                text: message.text,
                quick_reply: message.quick_reply.and_then(|q| q.payload),
                attachments,
            })
        } else {
            return None;
        };

        Some(InboundEvent {
            sender_id: self.sender.id,
            recipient_id: self.recipient.id,
            timestamp: self.timestamp,
            payload,
        })
    }
}

impl Callback {
    /// Whether the callback comes from a page subscription.
    pub fn is_page(&self) -> bool {
        self.object == "page"
    }

    /// Every actionable event in the batch, in delivery order.
    pub fn into_events(self) -> Vec<InboundEvent> {
        self.entry
            .into_iter()
            .flat_map(|e| e.messaging)
            .filter_map(Messaging::into_event)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Callback {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_text_message() {
        let cb = parse(serde_json::json!({
            "object": "page",
            "entry": [{"id": "p1", "time": 1, "messaging": [{
                "sender": {"id": "u1"},
                "recipient": {"id": "p1"},
                "timestamp": 1_528_000_000_000_i64,
                "message": {"mid": "m1", "text": "Apple"}
            }]}]
        }));
        assert!(cb.is_page());
        let events = cb.into_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sender_id, "u1");
        assert_eq!(events[0].recipient_id, "p1");
        assert!(events[0].sent_at().is_some());
        match &events[0].payload {
            EventPayload::Message(m) => {
                assert_eq!(m.text(), "Apple");
                assert!(m.coordinates().is_none());
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_location_attachment() {
        let cb = parse(serde_json::json!({
            "object": "page",
            "entry": [{"messaging": [{
                "sender": {"id": "u1"},
                "recipient": {"id": "p1"},
                "message": {"attachments": [
                    {"type": "image", "payload": {"url": "https://x/img.png"}},
                    {"type": "location", "payload": {"coordinates": {"lat": 25.047571, "long": 121.577812}}}
                ]}
            }]}]
        }));
        let events = cb.into_events();
        let EventPayload::Message(m) = &events[0].payload else {
            panic!("expected message");
        };
        assert_eq!(m.coordinates(), Some(Location::new(25.047571, 121.577812)));
    }

    #[test]
    fn test_postback_wins_over_message() {
        let raw = Messaging {
            sender: User { id: "u1".into() },
            postback: Some(Postback {
                title: "Browse".into(),
                payload: "search:11150".into(),
            }),
            message: Some(Message {
                text: Some("hi".into()),
                ..Message::default()
            }),
            ..Messaging::default()
        };
        let event = raw.into_event().unwrap();
        assert!(matches!(event.payload, EventPayload::Postback(ref p) if p.payload == "search:11150"));
    }

    #[test]
    fn test_receipts_and_echoes_are_skipped() {
        let cb = parse(serde_json::json!({
            "object": "page",
            "entry": [{"messaging": [
                {"sender": {"id": "u1"}, "recipient": {"id": "p1"}, "delivery": {"mids": ["m1"]}},
                {"sender": {"id": "p1"}, "recipient": {"id": "u1"}, "message": {"is_echo": true, "text": "hello"}},
                {"sender": {"id": "u1"}, "recipient": {"id": "p1"}, "account_linking": {"status": "linked", "authorization_code": "abc"}}
            ]}]
        }));
        let events = cb.into_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].payload,
            EventPayload::AccountLink(ref a) if a.authorization_code.as_deref() == Some("abc")
        ));
    }

    #[test]
    fn test_quick_reply_echo() {
        let cb = parse(serde_json::json!({
            "object": "page",
            "entry": [{"messaging": [{
                "sender": {"id": "u1"},
                "recipient": {"id": "p1"},
                "message": {"text": "Red", "quick_reply": {"payload": "COLOR_RED"}}
            }]}]
        }));
        let events = cb.into_events();
        let EventPayload::Message(m) = &events[0].payload else {
            panic!("expected message");
        };
        assert_eq!(m.quick_reply.as_deref(), Some("COLOR_RED"));
    }

    #[test]
    fn test_non_page_object() {
        let cb = parse(serde_json::json!({"object": "instagram", "entry": []}));
        assert!(!cb.is_page());
        assert!(cb.into_events().is_empty());
    }
}
