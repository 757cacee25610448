//! Catalog API backend

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use vitrine_common::config::ApiConfig;
use vitrine_common::{
    CategoriesResponse, Error, Product, Result, SearchParams, SearchResponse, TagsResponse,
};

/// Raw, fallible access to the catalog read endpoints
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// `GET /api/search`
    async fn search(&self, params: &SearchParams) -> Result<Vec<Product>>;

    /// `GET /api/categories`
    async fn categories(&self) -> Result<Vec<String>>;

    /// `GET /api/tags`
    async fn tags(&self) -> Result<Vec<String>>;
}

/// HTTP implementation of [`CatalogBackend`]
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    http: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&SearchParams>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if let Some(params) = params {
            request = request.query(params);
        }

        debug!("GET {}", url);
        let resp = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("{}: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Network(format!("{}: {}", url, e)))?;

        serde_json::from_str(&body).map_err(|e| Error::Decode(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl CatalogBackend for HttpCatalog {
    async fn search(&self, params: &SearchParams) -> Result<Vec<Product>> {
        let response: SearchResponse = self.get_json("/api/search", Some(params)).await?;
        Ok(response.into_products())
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let response: CategoriesResponse = self.get_json("/api/categories", None).await?;
        Ok(response.categories)
    }

    async fn tags(&self) -> Result<Vec<String>> {
        let response: TagsResponse = self.get_json("/api/tags", None).await?;
        Ok(response.tags)
    }
}
