use serde::{Deserialize, Deserializer, Serialize};

/// Product status value for items that can be ordered.
pub const STATUS_AVAILABLE: &str = "available";

/// A service type offered at a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    /// `"groceries"`, `"food"`, `"laundry"` and so on.
    #[serde(deserialize_with = "null_as_default")]
    pub service_type: String,
    /// Whether the service delivers to the location.
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
}

/// Pagination info returned with brand listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    /// 1-based page number.
    #[serde(deserialize_with = "null_as_default")]
    pub current_page: u32,
    /// Number of pages at the current page size.
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u32,
    /// Number of brands across all pages.
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: u32,
}

/// One page of brands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandPage {
    /// Brands on this page.
    #[serde(deserialize_with = "null_as_default")]
    pub brands: Vec<Brand>,
    /// Where this page sits in the listing.
    #[serde(deserialize_with = "null_as_default")]
    pub meta: PageMeta,
}

/// A brand (merchant) and the store that serves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Brand {
    /// Brand id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Short tagline.
    #[serde(deserialize_with = "null_as_default")]
    pub about: String,
    /// Long description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Service the brand belongs to.
    #[serde(deserialize_with = "null_as_default")]
    pub service_type: String,
    /// URL slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Store that fulfils orders for this brand.
    #[serde(deserialize_with = "null_as_default")]
    pub store_id: i64,
    /// Logo.
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    /// ISO currency code.
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// Number of products listed.
    #[serde(deserialize_with = "null_as_default")]
    pub products_count: u32,
    /// Closed right now.
    #[serde(deserialize_with = "null_as_default")]
    pub closed: bool,
    /// Next opening time, when closed.
    pub opens_at: Option<String>,
}

/// A product category inside a department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    /// Category id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Display title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// URL slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Thumbnail.
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    /// Number of products in the category.
    #[serde(deserialize_with = "null_as_default")]
    pub products_count: u32,
}

/// A store department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Department {
    /// Department id, used by the products endpoint.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Long description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Banner image.
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    /// Number of products in the department.
    #[serde(deserialize_with = "null_as_default")]
    pub products_count: u32,
    /// Categories inside the department.
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
}

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Display title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Long description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Full-size image.
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    /// Smaller preview image.
    #[serde(deserialize_with = "null_as_default")]
    pub preview_image_url: String,
    /// Image file name, joined to the configured image base URL.
    #[serde(deserialize_with = "null_as_default")]
    pub image_url_basename: String,
    /// ISO currency code.
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// URL slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Unit the price applies to.
    #[serde(deserialize_with = "null_as_default")]
    pub unit_type: String,
    /// Pack size, e.g. `1kg`.
    #[serde(deserialize_with = "null_as_default")]
    pub size: String,
    /// `"available"` when orderable.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Current price as a decimal string.
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
    /// Price before any discount.
    #[serde(deserialize_with = "null_as_default")]
    pub normal_price: String,
    /// Packing description.
    #[serde(deserialize_with = "null_as_default")]
    pub packing_size: String,
    /// Age-restricted item.
    #[serde(deserialize_with = "null_as_default")]
    pub alcohol: bool,
    /// Manufacturer brand.
    #[serde(deserialize_with = "null_as_default")]
    pub product_brand: String,
}

impl Product {
    /// Whether the product can currently be ordered.
    pub fn is_available(&self) -> bool {
        self.status == STATUS_AVAILABLE
    }
}

/// Decodes an explicit `null` as the type's default. Combined with
/// `#[serde(default)]` on the struct, absent and `null` fields read the same.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Response envelopes.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DepartmentsEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub departments: Vec<Department>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProductsEnvelope {
    pub products: Option<Vec<Product>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchQuery<'a> {
    pub page: u32,
    pub page_size: u32,
    pub platform: &'a str,
    pub q: &'a str,
}
