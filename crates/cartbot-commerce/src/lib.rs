//! Read-only client for the commerce catalog API.
//!
//! The conversation engine only depends on the [`CommerceClient`] trait;
//! [`HttpCommerceClient`] is the production implementation.
//!
//! # Main types
//!
//! - [`CommerceClient`]: Catalog queries used by the bot.
//! - [`HttpCommerceClient`]: `reqwest`-backed implementation.
//! - [`CommerceConfig`]: Endpoint, locale, and page-size settings.
//! - [`Service`], [`Brand`], [`Department`], [`Product`]: Catalog records.

/// Catalog client trait.
pub mod client;
/// Client configuration.
pub mod config;
/// HTTP implementation of the catalog client.
pub mod http;
/// Catalog record types.
pub mod types;

pub use client::CommerceClient;
pub use config::CommerceConfig;
pub use http::HttpCommerceClient;
pub use types::{
    Brand, BrandPage, Category, Department, PageMeta, Product, Service, STATUS_AVAILABLE,
};
