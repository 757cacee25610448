//! Core types for Vitrine

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog product as served by the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Creation time in UTC
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

fn default_in_stock() -> bool {
    true
}

/// RFC 3339 with an offset (normalised to UTC) or a bare local timestamp
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(stamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(stamp.naive_utc()));
    }
    raw.parse::<NaiveDateTime>()
        .map(Some)
        .map_err(serde::de::Error::custom)
}

impl Product {
    pub fn new(id: u32, name: &str, description: &str, price: f64, category: &str, tags: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            in_stock: true,
            created_at: None,
        }
    }
}

/// The text a catalog entry exposes to filtering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Record {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }
}

impl From<&Product> for Record {
    fn from(product: &Product) -> Self {
        Self {
            title: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            tags: product.tags.clone(),
        }
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
        }
    }
}

/// Query parameters for the search endpoint. Unset fields stay off the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchParams {
    pub fn query(query: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            ..Default::default()
        }
    }
}

/// Paginated envelope the search endpoint may answer with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Search endpoint body: either a bare list or a page
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Page(PaginatedResponse<Product>),
    List(Vec<Product>),
}

impl SearchResponse {
    pub fn into_products(self) -> Vec<Product> {
        match self {
            SearchResponse::Page(page) => page.items,
            SearchResponse::List(items) => items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

/// The demo catalog the page ships with
pub fn sample_catalog() -> Vec<Product> {
    vec![
        Product::new(
            1,
            "Wireless Headphones",
            "High-quality wireless headphones with noise cancellation",
            199.99,
            "Electronics",
            &["audio", "wireless", "premium"],
        ),
        Product::new(
            2,
            "Coffee Maker",
            "Programmable coffee maker with built-in grinder",
            89.99,
            "Appliances",
            &["kitchen", "coffee", "automatic"],
        ),
        Product::new(
            3,
            "Laptop Stand",
            "Adjustable aluminum laptop stand for ergonomic work",
            45.99,
            "Accessories",
            &["ergonomic", "aluminum", "adjustable"],
        ),
        Product::new(
            4,
            "Bluetooth Speaker",
            "Portable waterproof Bluetooth speaker with 12-hour battery",
            79.99,
            "Electronics",
            &["audio", "bluetooth", "portable", "waterproof"],
        ),
        Product::new(
            5,
            "Office Chair",
            "Ergonomic office chair with lumbar support and mesh back",
            299.99,
            "Furniture",
            &["ergonomic", "office", "lumbar", "mesh"],
        ),
        Product::new(
            6,
            "Smart Watch",
            "Fitness tracking smart watch with heart rate monitor",
            249.99,
            "Electronics",
            &["fitness", "smart", "health", "wearable"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_defaults_from_wire() {
        let product: Product = serde_json::from_str(
            r#"{"id": 7, "name": "Desk Lamp", "description": "LED", "price": 19.5, "category": "Lighting"}"#,
        )
        .unwrap();
        assert!(product.tags.is_empty());
        assert!(product.in_stock);
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_product_accepts_naive_timestamp() {
        let product: Product = serde_json::from_str(
            r#"{"id": 1, "name": "A", "description": "", "price": 1.0, "category": "C",
                "created_at": "2024-03-01T10:15:30.123456"}"#,
        )
        .unwrap();
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_product_accepts_offset_timestamps() {
        let utc: Product = serde_json::from_str(
            r#"{"id": 1, "name": "A", "description": "", "price": 1.0, "category": "C",
                "created_at": "2024-03-01T10:15:30Z"}"#,
        )
        .unwrap();
        let expected = NaiveDateTime::parse_from_str("2024-03-01 10:15:30", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(utc.created_at, Some(expected));

        let shifted: Product = serde_json::from_str(
            r#"{"id": 2, "name": "B", "description": "", "price": 1.0, "category": "C",
                "created_at": "2024-03-01T12:15:30+02:00"}"#,
        )
        .unwrap();
        assert_eq!(shifted.created_at, Some(expected));

        let null: Product = serde_json::from_str(
            r#"{"id": 3, "name": "C", "description": "", "price": 1.0, "category": "C", "created_at": null}"#,
        )
        .unwrap();
        assert!(null.created_at.is_none());

        assert!(serde_json::from_str::<Product>(
            r#"{"id": 4, "name": "D", "description": "", "price": 1.0, "category": "C", "created_at": "yesterday"}"#,
        )
        .is_err());
    }

    #[test]
    fn test_search_list_with_mixed_timestamps() {
        let list: SearchResponse = serde_json::from_str(
            r#"[{"id": 1, "name": "A", "description": "", "price": 1.0, "category": "C",
                 "created_at": "2024-03-01T10:15:30+00:00"},
                {"id": 2, "name": "B", "description": "", "price": 2.0, "category": "C",
                 "created_at": "2024-03-01T10:15:30"}]"#,
        )
        .unwrap();
        let products = list.into_products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].created_at, products[1].created_at);
    }

    #[test]
    fn test_search_response_shapes() {
        let list: SearchResponse = serde_json::from_str(
            r#"[{"id": 1, "name": "A", "description": "", "price": 1.0, "category": "C"}]"#,
        )
        .unwrap();
        assert_eq!(list.into_products().len(), 1);

        let page: SearchResponse = serde_json::from_str(
            r#"{"items": [], "total": 0, "page": 1, "limit": 10, "total_pages": 0,
                "has_next": false, "has_prev": false}"#,
        )
        .unwrap();
        assert!(page.into_products().is_empty());
    }

    #[test]
    fn test_search_params_skip_unset() {
        let params = SearchParams::query("mug");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"query": "mug"}));
    }

    #[test]
    fn test_record_from_product() {
        let catalog = sample_catalog();
        let record = Record::from(&catalog[4]);
        assert_eq!(record.title, "Office Chair");
        assert_eq!(record.category, "Furniture");
        assert!(record.tags.contains(&"office".to_string()));
    }
}
