use crate::classify::{classify, message_text, EventKind, TextCommand};
use crate::compose::Composer;
use crate::config::ConversationConfig;
use crate::router::{catalog_failure, failure, no_products, PostbackRouter, NO_PRODUCTS};
use crate::token::ActionToken;
use cartbot_commerce::CommerceClient;
use cartbot_core::Location;
use cartbot_messenger::{InboundEvent, OutboundMessage};
use cartbot_session::SessionStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves inbound events against the sender's session.
///
/// Postbacks go to the [`PostbackRouter`]. Everything else is resolved in
/// this order: account link, `get_location`, `login`, search in the viewing
/// store, location share, nothing. A selected viewing store wins over a
/// fresh location share.
pub struct Conversation {
    commerce: Arc<dyn CommerceClient>,
    sessions: SessionStore,
    composer: Composer,
    router: PostbackRouter,
}

impl Conversation {
    /// A conversation reading the catalog through `commerce` and keeping state in
    /// `sessions`.
    pub fn new(
        commerce: Arc<dyn CommerceClient>,
        sessions: SessionStore,
        config: &ConversationConfig,
    ) -> Self {
        let composer = Composer::new(config);
        let router = PostbackRouter::new(commerce.clone(), sessions.clone(), composer.clone());
        Self {
            commerce,
            sessions,
            composer,
            router,
        }
    }

    /// The reply to `event`, if any.
    pub async fn resolve(&self, event: &InboundEvent) -> Option<OutboundMessage> {
        let sender_id = event.sender_id.as_str();
        match classify(event) {
            EventKind::Postback(raw) => match ActionToken::parse(raw) {
                Some(token) => self.router.route(sender_id, &token).await,
                None => {
                    debug!(sender = %sender_id, payload = %raw, "Ignoring unrecognized postback");
                    None
                }
            },
            EventKind::AccountLink(code) => Some(self.link_account(sender_id, code).await),
            EventKind::TextCommand(TextCommand::GetLocation) => Some(self.composer.location_prompt()),
            EventKind::TextCommand(TextCommand::Login) => Some(self.composer.login()),
            EventKind::FreeText(text) => match self.sessions.viewing_store(sender_id).await {
                Some(store_id) => Some(self.search(sender_id, &store_id, text).await),
                None => {
                    debug!(sender = %sender_id, "No viewing store, ignoring text");
                    None
                }
            },
            EventKind::LocationAttachment(location) => {
                match self.sessions.viewing_store(sender_id).await {
                    Some(store_id) => {
                        Some(self.search(sender_id, &store_id, message_text(event)).await)
                    }
                    None => Some(self.list_services(sender_id, &location).await),
                }
            }
        }
    }

    async fn link_account(&self, sender_id: &str, code: &str) -> OutboundMessage {
        match self.sessions.save_auth_token(sender_id, code).await {
            Ok(()) => {
                info!(sender = %sender_id, "Account linked");
                Composer::text(code)
            }
            Err(e) => {
                warn!(sender = %sender_id, error = %e, "Failed to save login token");
                failure("Session store error", e)
            }
        }
    }

    async fn search(&self, sender_id: &str, store_id: &str, query: &str) -> OutboundMessage {
        debug!(sender = %sender_id, store = %store_id, query = %query, "Searching products");
        match self.commerce.search_products(store_id, query).await {
            Ok(products) => self.composer.products(&products).unwrap_or_else(no_products),
            Err(e) => catalog_failure(sender_id, NO_PRODUCTS, &e),
        }
    }

    async fn list_services(&self, sender_id: &str, location: &Location) -> OutboundMessage {
        const PREFIX: &str = "Cannot read services";
        let services = match self.commerce.services(location).await {
            Ok(services) => services,
            Err(e) => return catalog_failure(sender_id, PREFIX, &e),
        };
        if let Err(e) = self.sessions.save_location(sender_id, location).await {
            warn!(sender = %sender_id, error = %e, "Failed to save location");
            return failure("Location store error", e);
        }
        self.composer
            .services(&services)
            .unwrap_or_else(|| failure(PREFIX, "no service is available at this location"))
    }
}
