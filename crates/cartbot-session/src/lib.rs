//! Per-sender conversation state for Cartbot.
//!
//! State lives in a plain key→string store with no expiry. Every field of a
//! sender's [`Session`] is an independent key, so there is no atomicity
//! across fields and no compare-and-swap.
//!
//! # Main types
//!
//! - [`KeyValueStore`]: The storage contract: `get` and `set`.
//! - [`MemoryStore`]: In-process backend.
//! - [`FileStore`]: One file per key on disk.
//! - [`RedisStore`]: Shared Redis server, survives restarts.
//! - [`SessionStore`]: Typed access to a sender's location, viewing store,
//!   and login token.

/// Typed session access and key layout.
pub mod session;
/// Redis backend.
pub mod redis_store;
/// Key-value storage backends.
pub mod store;

pub use redis_store::RedisStore;
pub use session::{Session, SessionStore};
pub use store::{FileStore, KeyValueStore, MemoryStore};
