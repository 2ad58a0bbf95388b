//! HTTP gateway for Cartbot.
//!
//! Serves the Messenger webhook: `GET /webhook` answers the platform's
//! verification handshake, `POST /webhook` accepts event batches and hands
//! each event to its own task, `GET /health` reports liveness.

/// Router assembly and process lifecycle.
pub mod server;
/// Webhook handlers and signature checks.
pub mod webhook;

pub use server::{shutdown_signal, GatewayServer};
pub use webhook::{validate_secret, verify_signature, WebhookState};
