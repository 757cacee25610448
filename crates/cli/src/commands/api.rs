//! Catalog API commands

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::output::{print_names, print_rows, print_toast, Columns, OutputFormat};
use vitrine_client::{CatalogSearch, HttpCatalog};
use vitrine_common::{Product, SearchParams, ToastBoard, VitrineConfig};

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category filter
    #[arg(short, long)]
    pub category: Option<String>,

    /// Tag filter
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Minimum price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only products in stock
    #[arg(long)]
    pub in_stock: bool,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<SearchArgs> for SearchParams {
    fn from(args: SearchArgs) -> Self {
        Self {
            query: args.query.filter(|q| !q.is_empty()),
            category: args.category,
            tag: args.tag,
            min_price: args.min_price,
            max_price: args.max_price,
            in_stock: args.in_stock.then_some(true),
            page: args.page,
            limit: args.limit,
        }
    }
}

#[derive(Serialize)]
struct ProductDisplay {
    id: u32,
    name: String,
    category: String,
    price: f64,
    tags: Vec<String>,
    in_stock: bool,
}

impl From<Product> for ProductDisplay {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            category: p.category,
            price: p.price,
            tags: p.tags,
            in_stock: p.in_stock,
        }
    }
}

impl Columns for ProductDisplay {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Category", "Price", "Tags", "In Stock"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.category.clone(),
            format!("{:.2}", self.price),
            self.tags.join(", "),
            if self.in_stock { "yes" } else { "no" }.to_string(),
        ]
    }
}

/// Facade plus the board its failure toasts land on
pub fn connect(config: &VitrineConfig) -> Result<(CatalogSearch, ToastBoard)> {
    let backend = HttpCatalog::from_config(&config.api)?;
    let board = ToastBoard::new(config.notifications.ttl());
    let search = CatalogSearch::new(Arc::new(backend), Arc::new(board.clone()));
    Ok((search, board))
}

/// Print and dismiss the toasts raised so far
pub fn drain_toasts(board: &ToastBoard) {
    for toast in board.active() {
        print_toast(&toast);
        board.dismiss(toast.id);
    }
}

pub fn print_products(products: Vec<Product>, format: OutputFormat) {
    let rows: Vec<ProductDisplay> = products.into_iter().map(ProductDisplay::from).collect();
    print_rows(&rows, format);
}

pub async fn search(args: SearchArgs, config: &VitrineConfig, format: OutputFormat) -> Result<()> {
    let (search, board) = connect(config)?;
    print_products(search.search_products(&args.into()).await, format);
    drain_toasts(&board);
    Ok(())
}

pub async fn categories(config: &VitrineConfig, format: OutputFormat) -> Result<()> {
    let (search, board) = connect(config)?;
    print_names(&search.get_categories().await, format);
    drain_toasts(&board);
    Ok(())
}

pub async fn tags(config: &VitrineConfig, format: OutputFormat) -> Result<()> {
    let (search, board) = connect(config)?;
    print_names(&search.get_tags().await, format);
    drain_toasts(&board);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_to_params() {
        let args = SearchArgs {
            query: Some(String::new()),
            category: Some("Electronics".to_string()),
            tag: None,
            min_price: Some(10.0),
            max_price: None,
            in_stock: false,
            page: None,
            limit: Some(20),
        };
        let params = SearchParams::from(args);
        assert_eq!(params.query, None);
        assert_eq!(params.category.as_deref(), Some("Electronics"));
        assert_eq!(params.min_price, Some(10.0));
        assert_eq!(params.in_stock, None);
        assert_eq!(params.limit, Some(20));
    }

    #[test]
    fn test_in_stock_flag() {
        let args = SearchArgs {
            query: None,
            category: None,
            tag: None,
            min_price: None,
            max_price: None,
            in_stock: true,
            page: None,
            limit: None,
        };
        assert_eq!(SearchParams::from(args).in_stock, Some(true));
    }

    #[test]
    fn test_product_cells() {
        let product = vitrine_common::sample_catalog().remove(1);
        let cells = ProductDisplay::from(product).cells();
        assert_eq!(cells.len(), ProductDisplay::HEADERS.len());
        assert_eq!(cells[1], "Coffee Maker");
        assert_eq!(cells[3], "89.99");
        assert_eq!(cells[5], "yes");
    }

    #[tokio::test]
    async fn test_drain_toasts_clears_board() {
        let board = ToastBoard::default();
        board.show("Search failed. Please try again.", vitrine_common::Severity::Danger);
        drain_toasts(&board);
        assert!(board.is_empty());
    }
}
