use crate::compose::Composer;
use crate::token::ActionToken;
use cartbot_commerce::CommerceClient;
use cartbot_core::{CartbotError, Location};
use cartbot_messenger::OutboundMessage;
use cartbot_session::SessionStore;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes decoded postback tokens.
///
/// Only `search` writes session state; the listing tokens only read the
/// sender's location.
pub struct PostbackRouter {
    commerce: Arc<dyn CommerceClient>,
    sessions: SessionStore,
    composer: Composer,
}

impl PostbackRouter {
    /// A router sharing the conversation's catalog client, sessions and composer.
    pub fn new(commerce: Arc<dyn CommerceClient>, sessions: SessionStore, composer: Composer) -> Self {
        Self {
            commerce,
            sessions,
            composer,
        }
    }

    /// Reply for `token`, or `None` when the token has no reply.
    pub async fn route(&self, sender_id: &str, token: &ActionToken) -> Option<OutboundMessage> {
        debug!(sender = %sender_id, token = %token, "Routing postback");
        match token {
            ActionToken::Brands { service_type, page } => {
                Some(self.brands(sender_id, service_type, *page).await)
            }
            ActionToken::Departments { store_id } => Some(self.departments(sender_id, store_id).await),
            ActionToken::Products { department_id } => {
                Some(self.products(sender_id, department_id).await)
            }
            ActionToken::Search { store_id } => Some(self.select_store(sender_id, store_id).await),
            ActionToken::BuyProduct { product_id } => {
                debug!(sender = %sender_id, product = %product_id, "Checkout is not supported");
                None
            }
        }
    }

    async fn brands(&self, sender_id: &str, service_type: &str, page: u32) -> OutboundMessage {
        const PREFIX: &str = "No brand served in your location";
        let Some(location) = self.saved_location(sender_id).await else {
            return failure(PREFIX, MissingLocation);
        };
        match self.commerce.brands(service_type, page, &location).await {
            Ok(result) => self
                .composer
                .brands(&result, service_type, page)
                .unwrap_or_else(|| failure(PREFIX, format!("no brands on page {page}"))),
            Err(e) => catalog_failure(sender_id, PREFIX, &e),
        }
    }

    async fn departments(&self, sender_id: &str, store_id: &str) -> OutboundMessage {
        const PREFIX: &str = "No departments found";
        let Some(location) = self.saved_location(sender_id).await else {
            return failure(PREFIX, MissingLocation);
        };
        match self.commerce.departments(store_id, &location).await {
            Ok(departments) => self
                .composer
                .departments(&departments)
                .unwrap_or_else(|| failure(PREFIX, format!("store {store_id} has no departments"))),
            Err(e) => catalog_failure(sender_id, PREFIX, &e),
        }
    }

    async fn products(&self, sender_id: &str, department_id: &str) -> OutboundMessage {
        match self.commerce.products(department_id).await {
            Ok(products) => self.composer.products(&products).unwrap_or_else(no_products),
            Err(e) => catalog_failure(sender_id, NO_PRODUCTS, &e),
        }
    }

    async fn select_store(&self, sender_id: &str, store_id: &str) -> OutboundMessage {
        match self.sessions.save_viewing_store(sender_id, store_id).await {
            Ok(()) => {
                info!(sender = %sender_id, store = %store_id, "Viewing store selected");
                Composer::text(format!(
                    "We've selected store {store_id}, please type search keywords"
                ))
            }
            Err(e) => {
                warn!(sender = %sender_id, error = %e, "Failed to save viewing store");
                failure("Viewing storeID store error", e)
            }
        }
    }

    async fn saved_location(&self, sender_id: &str) -> Option<Location> {
        let location = self.sessions.location(sender_id).await;
        if location.is_none() {
            debug!(sender = %sender_id, "No saved location");
        }
        location
    }
}

pub(crate) const NO_PRODUCTS: &str = "No products found";

struct MissingLocation;

impl Display for MissingLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("location unknown, please share your location first")
    }
}

/// `"<prefix>: <reason>"` as a text reply.
pub(crate) fn failure(prefix: &str, reason: impl Display) -> OutboundMessage {
    Composer::text(format!("{prefix}: {reason}"))
}

pub(crate) fn no_products() -> OutboundMessage {
    failure(NO_PRODUCTS, "no available products")
}

pub(crate) fn catalog_failure(sender_id: &str, prefix: &str, error: &CartbotError) -> OutboundMessage {
    warn!(sender = %sender_id, error = %error, "{prefix}");
    failure(prefix, error)
}
