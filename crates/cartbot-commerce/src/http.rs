use crate::client::CommerceClient;
use crate::config::CommerceConfig;
use crate::types::{
    BrandPage, Department, DepartmentsEnvelope, Product, ProductsEnvelope, SearchQuery, Service,
};
use async_trait::async_trait;
use cartbot_core::{CartbotError, CartbotResult, Location};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Catalog client talking to the commerce REST API over HTTP.
pub struct HttpCommerceClient {
    config: CommerceConfig,
    http: reqwest::Client,
}

impl HttpCommerceClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: CommerceConfig) -> CartbotResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CartbotError::Http(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &CommerceConfig {
        &self.config
    }

    /// GET `path` with the vendor media type at the given API version.
    fn get(&self, path: &str, api_version: u8) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        self.http
            .get(url)
            .header(
                ACCEPT,
                format!("application/vnd.honestbee+json;version={api_version}"),
            )
            .header(ACCEPT_LANGUAGE, &self.config.accept_language)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn fetch<T: DeserializeOwned>(&self, op: &str, request: RequestBuilder) -> CartbotResult<T> {
        let resp = request
            .send()
            .await
            .map_err(|e| CartbotError::Commerce(format!("{op} request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CartbotError::Commerce(format!("{op} response unreadable: {e}")))?;

        if !status.is_success() {
            return Err(CartbotError::Commerce(format!(
                "{op} returned {status}: {body}"
            )));
        }

        debug!(op, bytes = body.len(), "Commerce response received");
        serde_json::from_str(&body)
            .map_err(|e| CartbotError::Commerce(format!("{op} response malformed: {e}")))
    }
}

fn coordinates(location: &Location) -> [(&'static str, String); 2] {
    [
        ("latitude", location.latitude.to_string()),
        ("longitude", location.longitude.to_string()),
    ]
}

#[async_trait]
impl CommerceClient for HttpCommerceClient {
    async fn services(&self, location: &Location) -> CartbotResult<Vec<Service>> {
        let path = format!(
            "/api/countries/{}/available_services",
            self.config.country_code
        );
        let request = self.get(&path, 1).query(&coordinates(location));
        self.fetch("services", request).await
    }

    async fn brands(
        &self,
        service_type: &str,
        page: u32,
        location: &Location,
    ) -> CartbotResult<BrandPage> {
        let request = self
            .get("/api/brands", 2)
            .query(&[
                ("countryCode", self.config.country_code.clone()),
                ("page", page.to_string()),
                ("page_size", self.config.brands_page_size.to_string()),
                ("serviceType", service_type.to_string()),
            ])
            .query(&coordinates(location));
        self.fetch("brands", request).await
    }

    async fn departments(
        &self,
        store_id: &str,
        location: &Location,
    ) -> CartbotResult<Vec<Department>> {
        let path = format!("/api/stores/{store_id}/directory");
        let request = self.get(&path, 2).query(&coordinates(location));
        let envelope: DepartmentsEnvelope = self.fetch("departments", request).await?;
        Ok(envelope.departments)
    }

    async fn products(&self, department_id: &str) -> CartbotResult<Vec<Product>> {
        let path = format!("/api/departments/{department_id}");
        let request = self.get(&path, 2).query(&[
            ("page", "1".to_string()),
            ("pageSize", self.config.products_page_size.to_string()),
            ("sort", "ranking".to_string()),
        ]);
        let envelope: ProductsEnvelope = self.fetch("products", request).await?;
        Ok(envelope.products.unwrap_or_default())
    }

    async fn search_products(&self, store_id: &str, query: &str) -> CartbotResult<Vec<Product>> {
        let path = format!("/api/stores/{store_id}");
        // The search endpoint takes its query as a JSON body on a GET.
        let request = self.get(&path, 2).json(&SearchQuery {
            page: 1,
            page_size: self.config.search_page_size,
            platform: "iOS",
            q: query,
        });
        let envelope: ProductsEnvelope = self.fetch("search", request).await?;
        Ok(envelope.products.unwrap_or_default())
    }
}
