use serde::{Serialize, Serializer};

/// A reply to the user. Each variant maps to exactly one platform shape.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    /// Plain text.
    Text {
        /// Message body.
        text: String,
    },
    /// Text with a single "share location" quick reply.
    QuickReplyLocationPrompt {
        /// Prompt shown above the quick reply.
        text: String,
    },
    /// Button template: a prompt and its buttons.
    ButtonTemplate {
        /// Prompt shown above the buttons.
        text: String,
        /// At most three buttons.
        buttons: Vec<Button>,
    },
    /// Compact list template with optional trailing buttons.
    ListTemplate {
        /// Rows, two to four.
        elements: Vec<ListElement>,
        /// Buttons under the list, e.g. "View More".
        buttons: Vec<Button>,
    },
    /// Square-image generic template, one action button per card.
    GenericCarousel {
        /// Cards, left to right.
        elements: Vec<CarouselElement>,
    },
}

/// A template button.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    /// Sends `payload` back to the bot as a postback.
    Postback {
        /// Button label.
        title: String,
        /// Action token delivered with the postback.
        payload: String,
    },
    /// Starts the account-linking flow at `url`.
    AccountLink {
        /// Login page of the linked account.
        url: String,
    },
}

impl Button {
    /// A postback button labelled `title`.
    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Postback {
            title: title.into(),
            payload: payload.into(),
        }
    }

    /// Postback payload, if this is a postback button.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Postback { payload, .. } => Some(payload.as_str()),
            _ => None,
        }
    }
}

/// A row of a list template.
#[derive(Debug, Clone, PartialEq)]
pub struct ListElement {
    /// Row heading.
    pub title: String,
    /// Second line, omitted from the wire when `None`.
    pub subtitle: Option<String>,
    /// Thumbnail.
    pub image_url: Option<String>,
    /// At most one button per row.
    pub buttons: Vec<Button>,
}

/// A card of a generic template.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselElement {
    /// Card heading.
    pub title: String,
    /// Text under the heading; may span lines.
    pub subtitle: String,
    /// Square card image.
    pub image_url: String,
    /// The card's only action.
    pub button: Button,
}

/// Sender actions shown in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    /// Typing indicator, shown until the next message or about 20 seconds.
    TypingOn,
}

impl OutboundMessage {
    /// A plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    fn to_wire(&self) -> WireMessage<'_> {
        match self {
            Self::Text { text } => WireMessage {
                text: Some(text.as_str()),
                ..WireMessage::default()
            },
            Self::QuickReplyLocationPrompt { text } => WireMessage {
                text: Some(text.as_str()),
                quick_replies: Some(vec![WireQuickReply {
                    content_type: "location",
                }]),
                ..WireMessage::default()
            },
            Self::ButtonTemplate { text, buttons } => {
                WireMessage::template(WireTemplate::Button { text, buttons })
            }
            Self::ListTemplate { elements, buttons } => WireMessage::template(WireTemplate::List {
                top_element_style: "compact",
                elements: elements
                    .iter()
                    .map(|e| WireElement {
                        title: &e.title,
                        subtitle: e.subtitle.as_deref(),
                        image_url: e.image_url.as_deref(),
                        buttons: &e.buttons,
                    })
                    .collect(),
                buttons,
            }),
            Self::GenericCarousel { elements } => WireMessage::template(WireTemplate::Generic {
                image_aspect_ratio: "square",
                elements: elements
                    .iter()
                    .map(|e| WireElement {
                        title: &e.title,
                        subtitle: Some(e.subtitle.as_str()),
                        image_url: Some(e.image_url.as_str()),
                        buttons: std::slice::from_ref(&e.button),
                    })
                    .collect(),
            }),
        }
    }
}

impl Serialize for OutboundMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

// ── Wire encoding ───────────────────────────────────────────────────────────

#[derive(Serialize, Default)]
struct WireMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quick_replies: Option<Vec<WireQuickReply>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment: Option<WireAttachment<'a>>,
}

impl<'a> WireMessage<'a> {
    fn template(payload: WireTemplate<'a>) -> Self {
        Self {
            attachment: Some(WireAttachment {
                kind: "template",
                payload,
            }),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct WireQuickReply {
    content_type: &'static str,
}

#[derive(Serialize)]
struct WireAttachment<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    payload: WireTemplate<'a>,
}

#[derive(Serialize)]
#[serde(tag = "template_type", rename_all = "lowercase")]
enum WireTemplate<'a> {
    Button {
        text: &'a str,
        buttons: &'a [Button],
    },
    List {
        top_element_style: &'static str,
        elements: Vec<WireElement<'a>>,
        #[serde(skip_serializing_if = "<[Button]>::is_empty")]
        buttons: &'a [Button],
    },
    Generic {
        image_aspect_ratio: &'static str,
        elements: Vec<WireElement<'a>>,
    },
}

#[derive(Serialize)]
struct WireElement<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "<[Button]>::is_empty")]
    buttons: &'a [Button],
}

/// Send API request body.
#[derive(Debug, Serialize)]
pub(crate) struct SendRequest<'a> {
    pub recipient: Recipient<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a OutboundMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_action: Option<SenderAction>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Recipient<'a> {
    pub id: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(message: &OutboundMessage) -> serde_json::Value {
        serde_json::to_value(message).unwrap()
    }

    #[test]
    fn test_text() {
        assert_eq!(wire(&OutboundMessage::text("hi")), json!({"text": "hi"}));
    }

    #[test]
    fn test_location_prompt() {
        let msg = OutboundMessage::QuickReplyLocationPrompt {
            text: "Please tell me your location".into(),
        };
        assert_eq!(
            wire(&msg),
            json!({
                "text": "Please tell me your location",
                "quick_replies": [{"content_type": "location"}]
            })
        );
    }

    #[test]
    fn test_button_template_with_each_button_kind() {
        let msg = OutboundMessage::ButtonTemplate {
            text: "Pick one".into(),
            buttons: vec![
                Button::postback("Groceries", "brands:groceries:1"),
                Button::AccountLink {
                    url: "https://shop.example/login".into(),
                },
            ],
        };
        assert_eq!(
            wire(&msg),
            json!({"attachment": {"type": "template", "payload": {
                "template_type": "button",
                "text": "Pick one",
                "buttons": [
                    {"type": "postback", "title": "Groceries", "payload": "brands:groceries:1"},
                    {"type": "account_link", "url": "https://shop.example/login"}
                ]
            }}})
        );
    }

    #[test]
    fn test_list_template_trailing_buttons() {
        let msg = OutboundMessage::ListTemplate {
            elements: vec![ListElement {
                title: "Carrefour".into(),
                subtitle: None,
                image_url: Some("https://cdn/c.png".into()),
                buttons: vec![Button::postback("Browse", "search:11150")],
            }],
            buttons: vec![Button::postback("View More", "brands:groceries:2")],
        };
        let v = wire(&msg);
        let payload = &v["attachment"]["payload"];
        assert_eq!(payload["template_type"], "list");
        assert_eq!(payload["top_element_style"], "compact");
        assert!(payload["elements"][0].get("subtitle").is_none());
        assert_eq!(payload["elements"][0]["buttons"][0]["payload"], "search:11150");
        assert_eq!(payload["buttons"][0]["payload"], "brands:groceries:2");
    }

    #[test]
    fn test_list_template_without_trailing_buttons() {
        let msg = OutboundMessage::ListTemplate {
            elements: vec![],
            buttons: vec![],
        };
        assert!(wire(&msg)["attachment"]["payload"].get("buttons").is_none());
    }

    #[test]
    fn test_generic_carousel() {
        let msg = OutboundMessage::GenericCarousel {
            elements: vec![CarouselElement {
                title: "Fuji Apple".into(),
                subtitle: "Orchard (1kg)\n$120".into(),
                image_url: "https://assets/fuji.jpg".into(),
                button: Button::postback("Shop Now", "buy_product:900"),
            }],
        };
        let v = wire(&msg);
        let payload = &v["attachment"]["payload"];
        assert_eq!(payload["template_type"], "generic");
        assert_eq!(payload["image_aspect_ratio"], "square");
        assert_eq!(payload["elements"][0]["subtitle"], "Orchard (1kg)\n$120");
        assert_eq!(payload["elements"][0]["buttons"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_send_request_envelopes() {
        let typing = SendRequest {
            recipient: Recipient { id: "u1" },
            message: None,
            sender_action: Some(SenderAction::TypingOn),
        };
        assert_eq!(
            serde_json::to_value(&typing).unwrap(),
            json!({"recipient": {"id": "u1"}, "sender_action": "typing_on"})
        );

        let text = OutboundMessage::text("ok");
        let reply = SendRequest {
            recipient: Recipient { id: "u1" },
            message: Some(&text),
            sender_action: None,
        };
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"recipient": {"id": "u1"}, "message": {"text": "ok"}})
        );
    }
}
