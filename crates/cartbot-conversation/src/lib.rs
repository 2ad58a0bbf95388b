//! Conversation engine for Cartbot.
//!
//! Turns one [`InboundEvent`](cartbot_messenger::InboundEvent) into at most
//! one [`OutboundMessage`](cartbot_messenger::OutboundMessage), reading and
//! writing the sender's session and querying the catalog along the way.
//!
//! # Main types
//!
//! - [`classify`]: Which branch an event belongs to.
//! - [`ActionToken`]: Decoded postback payloads (`brands:groceries:1`, ...).
//! - [`Composer`]: Catalog results to reply shapes.
//! - [`PostbackRouter`]: Executes action tokens.
//! - [`Conversation`]: Resolves any event against session state.
//! - [`EventProcessor`]: Per-event task: typing indicator, resolve, delayed reply.

/// Event classification.
pub mod classify;
/// Reply composition.
pub mod compose;
/// Engine settings.
pub mod config;
/// Per-sender serialization.
pub mod locks;
/// Session state machine for non-postback events.
pub mod machine;
/// Event processing and delivery.
pub mod processor;
/// Postback routing.
pub mod router;
/// Postback action tokens.
pub mod token;

pub use classify::{classify, EventKind, TextCommand};
pub use compose::Composer;
pub use config::ConversationConfig;
pub use locks::{SenderGuard, SenderLocks};
pub use machine::Conversation;
pub use processor::EventProcessor;
pub use router::PostbackRouter;
pub use token::ActionToken;
