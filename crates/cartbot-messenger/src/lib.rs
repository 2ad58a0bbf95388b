//! Messenger platform adapter.
//!
//! Decodes webhook callbacks into [`InboundEvent`]s, models the five reply
//! shapes the bot can send as the [`OutboundMessage`] sum type, and delivers
//! them through the Send API.
//!
//! # Main types
//!
//! - [`Callback`]: Raw webhook body.
//! - [`InboundEvent`]: One user event with exactly one payload.
//! - [`OutboundMessage`]: Text, location prompt, button/list/generic template.
//! - [`Dispatcher`]: Delivery contract used by the conversation engine.
//! - [`MessengerClient`]: Send API implementation of [`Dispatcher`].

/// Send API client.
pub mod client;
/// Platform configuration.
pub mod config;
/// Delivery trait.
pub mod dispatcher;
/// Webhook callback and inbound event types.
pub mod inbound;
/// Outbound message shapes and their wire encoding.
pub mod outbound;

pub use client::MessengerClient;
pub use config::MessengerConfig;
pub use dispatcher::Dispatcher;
pub use inbound::{
    AccountLinking, Attachment, Callback, EventPayload, InboundEvent, MessagePayload, Messaging,
    Postback,
};
pub use outbound::{Button, CarouselElement, ListElement, OutboundMessage, SenderAction};
