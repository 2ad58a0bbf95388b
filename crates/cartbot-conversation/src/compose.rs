use crate::config::ConversationConfig;
use crate::token::ActionToken;
use cartbot_commerce::{BrandPage, Department, Product, Service};
use cartbot_messenger::{Button, CarouselElement, ListElement, OutboundMessage};

/// Most departments shown in one button template.
pub const MAX_DEPARTMENT_BUTTONS: usize = 2;

/// Text of the share-location quick reply.
pub const LOCATION_PROMPT: &str = "Please tell me your location";
/// Heading of the services button template.
pub const SERVICES_PROMPT: &str = "These are the available services";
/// Text of the account-link button template.
pub const LOGIN_PROMPT: &str = "Log in to your shopping account";
/// Heading of the departments button template.
pub const DEPARTMENTS_PROMPT: &str = "Pick a department";

/// Builds replies from catalog results. No I/O.
///
/// Listing methods return `None` when nothing would be shown, so callers can
/// report the empty result the same way as a failed fetch.
#[derive(Debug, Clone)]
pub struct Composer {
    login_url: String,
    image_base_url: String,
}

impl Composer {
    /// A composer using the configured login page and product image root.
    pub fn new(config: &ConversationConfig) -> Self {
        Self {
            login_url: config.login_url.clone(),
            image_base_url: config.image_base_url.clone(),
        }
    }

    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> OutboundMessage {
        OutboundMessage::text(text)
    }

    /// Ask the user to share their location.
    pub fn location_prompt(&self) -> OutboundMessage {
        OutboundMessage::QuickReplyLocationPrompt {
            text: LOCATION_PROMPT.to_string(),
        }
    }

    /// Offer the account-linking flow.
    pub fn login(&self) -> OutboundMessage {
        OutboundMessage::ButtonTemplate {
            text: LOGIN_PROMPT.to_string(),
            buttons: vec![Button::AccountLink {
                url: self.login_url.clone(),
            }],
        }
    }

    /// One button per available service, each opening page 1 of its brands.
    pub fn services(&self, services: &[Service]) -> Option<OutboundMessage> {
        let buttons: Vec<Button> = services
            .iter()
            .filter(|s| s.available)
            .map(|s| {
                let token = ActionToken::Brands {
                    service_type: s.service_type.clone(),
                    page: 1,
                };
                Button::postback(&s.service_type, token.to_string())
            })
            .collect();
        if buttons.is_empty() {
            return None;
        }
        Some(OutboundMessage::ButtonTemplate {
            text: SERVICES_PROMPT.to_string(),
            buttons,
        })
    }

    /// Compact list of brands with a trailing "View More" button.
    ///
    /// "View More" opens page `page + 1` of the first listed brand's service
    /// type, falling back to `service_type` when the brand carries none.
    pub fn brands(&self, result: &BrandPage, service_type: &str, page: u32) -> Option<OutboundMessage> {
        let first = result.brands.first()?;
        let next_service = if first.service_type.is_empty() {
            service_type
        } else {
            first.service_type.as_str()
        };

        let elements = result
            .brands
            .iter()
            .map(|brand| ListElement {
                title: brand.name.clone(),
                subtitle: non_empty(&brand.about),
                image_url: non_empty(&brand.image_url),
                buttons: vec![Button::postback(
                    "Browse",
                    ActionToken::Search {
                        store_id: brand.store_id.to_string(),
                    }
                    .to_string(),
                )],
            })
            .collect();

        let view_more = ActionToken::Brands {
            service_type: next_service.to_string(),
            page: page.saturating_add(1),
        };
        Some(OutboundMessage::ListTemplate {
            elements,
            buttons: vec![Button::postback("View More", view_more.to_string())],
        })
    }

    /// Button template over the first [`MAX_DEPARTMENT_BUTTONS`] departments.
    pub fn departments(&self, departments: &[Department]) -> Option<OutboundMessage> {
        if departments.is_empty() {
            return None;
        }
        let buttons = departments
            .iter()
            .take(MAX_DEPARTMENT_BUTTONS)
            .map(|d| {
                let token = ActionToken::Products {
                    department_id: d.id.to_string(),
                };
                Button::postback(&d.name, token.to_string())
            })
            .collect();
        Some(OutboundMessage::ButtonTemplate {
            text: DEPARTMENTS_PROMPT.to_string(),
            buttons,
        })
    }

    /// Carousel of the available products, each with a "Shop Now" button.
    pub fn products(&self, products: &[Product]) -> Option<OutboundMessage> {
        let elements: Vec<CarouselElement> = products
            .iter()
            .filter(|p| p.is_available())
            .map(|p| CarouselElement {
                title: p.title.clone(),
                subtitle: format!("{} ({})\n${}", p.product_brand, p.size, p.price),
                image_url: format!("{}{}", self.image_base_url, p.image_url_basename),
                button: Button::postback(
                    "Shop Now",
                    ActionToken::BuyProduct {
                        product_id: p.id.to_string(),
                    }
                    .to_string(),
                ),
            })
            .collect();
        if elements.is_empty() {
            return None;
        }
        Some(OutboundMessage::GenericCarousel { elements })
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
