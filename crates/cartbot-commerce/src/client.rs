use crate::types::{BrandPage, Department, Product, Service};
use async_trait::async_trait;
use cartbot_core::{CartbotResult, Location};

/// Read-only catalog queries.
///
/// Location-dependent queries take a `&Location`; callers that have no
/// saved location must not call them.
#[async_trait]
pub trait CommerceClient: Send + Sync {
    /// Services (groceries, food, laundry...) offered at a location.
    async fn services(&self, location: &Location) -> CartbotResult<Vec<Service>>;

    /// One page of brands offering `service_type` near `location`.
    /// Pages start at 1.
    async fn brands(
        &self,
        service_type: &str,
        page: u32,
        location: &Location,
    ) -> CartbotResult<BrandPage>;

    /// Department directory of a store.
    async fn departments(
        &self,
        store_id: &str,
        location: &Location,
    ) -> CartbotResult<Vec<Department>>;

    /// First page of a department's products, by ranking.
    async fn products(&self, department_id: &str) -> CartbotResult<Vec<Product>>;

    /// Free-text product search within one store.
    async fn search_products(&self, store_id: &str, query: &str) -> CartbotResult<Vec<Product>>;
}
