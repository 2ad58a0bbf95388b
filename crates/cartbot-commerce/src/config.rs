use serde::{Deserialize, Serialize};

/// Settings for [`HttpCommerceClient`](crate::HttpCommerceClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommerceConfig {
    /// Catalog API root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Country passed to the services and brands endpoints.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Sent as `Accept-Language`; picks the language of catalog text.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// Brands per page.
    #[serde(default = "default_brands_page_size")]
    pub brands_page_size: u32,
    /// Products fetched per department.
    #[serde(default = "default_products_page_size")]
    pub products_page_size: u32,
    /// Products fetched per search.
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://core.honestbee.com".to_string()
}

fn default_country_code() -> String {
    "TW".to_string()
}

fn default_accept_language() -> String {
    "zh-TW".to_string()
}

fn default_brands_page_size() -> u32 {
    3
}

fn default_products_page_size() -> u32 {
    10
}

fn default_search_page_size() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            country_code: default_country_code(),
            accept_language: default_accept_language(),
            brands_page_size: default_brands_page_size(),
            products_page_size: default_products_page_size(),
            search_page_size: default_search_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CommerceConfig {
    /// Same defaults, pointed at another API host (mock servers, staging).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
