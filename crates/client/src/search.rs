//! Recovering search facade
//!
//! Every call succeeds from the caller's point of view. Failures are logged,
//! reported through the injected notifier and collapse to an empty list.

use crate::backend::CatalogBackend;
use std::sync::Arc;
use tracing::{error, info};
use vitrine_common::{Notifier, Product, SearchParams, Severity};

pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const CATEGORIES_FAILED: &str = "Could not load categories.";
pub const TAGS_FAILED: &str = "Could not load tags.";

#[derive(Clone)]
pub struct CatalogSearch {
    backend: Arc<dyn CatalogBackend>,
    notifier: Arc<dyn Notifier>,
}

impl CatalogSearch {
    pub fn new(backend: Arc<dyn CatalogBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self { backend, notifier }
    }

    pub async fn search_products(&self, params: &SearchParams) -> Vec<Product> {
        match self.backend.search(params).await {
            Ok(products) => {
                info!("Search returned {} product(s)", products.len());
                products
            }
            Err(e) => {
                error!("Search API error: {}", e);
                self.notifier.notify(SEARCH_FAILED, Severity::Danger);
                Vec::new()
            }
        }
    }

    pub async fn get_categories(&self) -> Vec<String> {
        self.backend.categories().await.unwrap_or_else(|e| {
            error!("Categories API error: {}", e);
            self.notifier.notify(CATEGORIES_FAILED, Severity::Warning);
            Vec::new()
        })
    }

    pub async fn get_tags(&self) -> Vec<String> {
        self.backend.tags().await.unwrap_or_else(|e| {
            error!("Tags API error: {}", e);
            self.notifier.notify(TAGS_FAILED, Severity::Warning);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use vitrine_common::{Error, Result, ToastBoard};

    struct Down;

    #[async_trait]
    impl CatalogBackend for Down {
        async fn search(&self, _params: &SearchParams) -> Result<Vec<Product>> {
            Err(Error::Network("connection refused".to_string()))
        }

        async fn categories(&self) -> Result<Vec<String>> {
            Err(Error::Decode("expected object".to_string()))
        }

        async fn tags(&self) -> Result<Vec<String>> {
            Err(Error::Http { status: 502 })
        }
    }

    struct Up;

    #[async_trait]
    impl CatalogBackend for Up {
        async fn search(&self, _params: &SearchParams) -> Result<Vec<Product>> {
            Ok(vitrine_common::sample_catalog())
        }

        async fn categories(&self) -> Result<Vec<String>> {
            Ok(vec!["Electronics".to_string()])
        }

        async fn tags(&self) -> Result<Vec<String>> {
            Ok(vec!["audio".to_string()])
        }
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty_and_notify() {
        let board = ToastBoard::default();
        let search = CatalogSearch::new(Arc::new(Down), Arc::new(board.clone()));

        assert!(search.search_products(&SearchParams::query("mug")).await.is_empty());
        assert!(search.get_categories().await.is_empty());
        assert!(search.get_tags().await.is_empty());

        let toasts: Vec<(String, Severity)> = board
            .active()
            .into_iter()
            .map(|t| (t.message, t.severity))
            .collect();
        assert_eq!(
            toasts,
            vec![
                (SEARCH_FAILED.to_string(), Severity::Danger),
                (CATEGORIES_FAILED.to_string(), Severity::Warning),
                (TAGS_FAILED.to_string(), Severity::Warning),
            ]
        );
    }

    #[tokio::test]
    async fn test_success_is_silent() {
        let board = ToastBoard::default();
        let search = CatalogSearch::new(Arc::new(Up), Arc::new(board.clone()));

        assert_eq!(search.search_products(&SearchParams::default()).await.len(), 6);
        assert_eq!(search.get_categories().await, vec!["Electronics"]);
        assert_eq!(search.get_tags().await, vec!["audio"]);
        assert!(board.is_empty());
    }
}
