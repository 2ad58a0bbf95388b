//! Core types and error definitions for Cartbot.
//!
//! This crate provides the foundational types shared across all Cartbot
//! crates: the unified error enum and the geographic [`Location`] that both
//! the session store and the commerce client speak.
//!
//! # Main types
//!
//! - [`CartbotError`]: Unified error enum for all Cartbot subsystems.
//! - [`CartbotResult`]: Convenience alias for `Result<T, CartbotError>`.
//! - [`Location`]: A latitude/longitude pair shared by a user.

/// Error types.
pub mod error;
/// Geographic location shared by users.
pub mod location;

pub use error::{CartbotError, CartbotResult};
pub use location::Location;
