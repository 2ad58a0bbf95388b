use crate::outbound::{OutboundMessage, SenderAction};
use async_trait::async_trait;
use cartbot_core::CartbotResult;

/// Delivers replies to a user on the messaging platform.
///
/// Callers log failures and move on; implementations must not retry.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Show a sender action such as the typing indicator.
    async fn send_action(&self, recipient_id: &str, action: SenderAction) -> CartbotResult<()>;

    /// Send one composed message.
    async fn send_message(&self, recipient_id: &str, message: &OutboundMessage) -> CartbotResult<()>;
}
