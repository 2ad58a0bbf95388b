use crate::locks::SenderLocks;
use crate::machine::Conversation;
use cartbot_messenger::{Dispatcher, InboundEvent, SenderAction};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info_span, warn, Instrument};

/// Handles one inbound event end to end.
///
/// Sends the typing indicator, resolves the reply while holding the sender's
/// lock, then sends the reply no earlier than `typing_delay` after the
/// indicator. Delivery failures are logged and dropped.
pub struct EventProcessor {
    conversation: Conversation,
    dispatcher: Arc<dyn Dispatcher>,
    locks: SenderLocks,
    typing_delay: Duration,
}

impl EventProcessor {
    /// A processor that waits `typing_delay` between the indicator and the
    /// reply.
    pub fn new(
        conversation: Conversation,
        dispatcher: Arc<dyn Dispatcher>,
        typing_delay: Duration,
    ) -> Self {
        Self {
            conversation,
            dispatcher,
            locks: SenderLocks::new(),
            typing_delay,
        }
    }

    /// Handle `event` inside an `event` span tagged with its sender and send
    /// time.
    pub async fn process(&self, event: InboundEvent) {
        let span = info_span!("event", sender = %event.sender_id, sent_at = ?event.sent_at());
        self.handle(event).instrument(span).await;
    }

    async fn handle(&self, event: InboundEvent) {
        let sender_id = event.sender_id.as_str();

        if let Err(e) = self
            .dispatcher
            .send_action(sender_id, SenderAction::TypingOn)
            .await
        {
            warn!(error = %e, "Failed to send typing indicator");
        }
        let typing_started = Instant::now();

        let reply = {
            let _guard = self.locks.lock(sender_id).await;
            self.conversation.resolve(&event).await
        };
        let Some(reply) = reply else {
            debug!("Nothing to reply");
            return;
        };

        sleep_until(typing_started + self.typing_delay).await;
        if let Err(e) = self.dispatcher.send_message(sender_id, &reply).await {
            warn!(error = %e, "Failed to deliver reply");
        }
    }
}
