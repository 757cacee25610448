//! Live filter commands over a local catalog

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info};

use super::api;
use crate::output::{print_line, print_rows, Columns, OutputFormat};
use vitrine_client::{AutoSubmit, SearchOutcome};
use vitrine_common::{sample_catalog, DebounceState, Product, ToastBoard, VitrineConfig};
use vitrine_page::view::counter_text;
use vitrine_page::{
    AppliedFilter, CatalogCard, CounterLabel, FilterSession, LiveFilter, QueryListener, RecordView,
};

#[derive(Args)]
pub struct FilterArgs {
    /// Search box contents
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Catalog JSON file (array of products); the sample catalog when omitted
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
pub struct WatchArgs {
    /// Catalog JSON file (array of products); the sample catalog when omitted
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,
}

/// Card as shown by the CLI
#[derive(Serialize)]
struct CardDisplay {
    id: Option<u32>,
    name: String,
    category: String,
    tags: Vec<String>,
    price: Option<f64>,
    display: String,
    opacity: f32,
}

impl From<&CatalogCard> for CardDisplay {
    fn from(card: &CatalogCard) -> Self {
        let display = card.display();
        Self {
            id: card.id,
            name: card.record.title.clone(),
            category: card.record.category.clone(),
            tags: card.record.tags.clone(),
            price: card.price,
            display: display.to_string(),
            opacity: display.opacity(),
        }
    }
}

impl Columns for CardDisplay {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Category", "Tags", "Price", "Display"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            self.name.clone(),
            self.category.clone(),
            self.tags.join(", "),
            self.price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string()),
            self.display.clone(),
        ]
    }
}

/// Load products from a JSON file, or the sample catalog
pub fn load_catalog(path: Option<&Path>) -> Result<Vec<Product>> {
    let Some(path) = path else {
        debug!("No catalog file given, using the sample catalog");
        return Ok(sample_catalog());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let products: Vec<Product> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    info!("Loaded {} product(s) from {}", products.len(), path.display());
    Ok(products)
}

fn cards(products: &[Product]) -> Vec<CatalogCard> {
    products.iter().map(CatalogCard::from).collect()
}

fn print_cards(cards: &[CatalogCard], visible_count: usize, format: OutputFormat) {
    let rows: Vec<CardDisplay> = cards.iter().map(CardDisplay::from).collect();
    print_rows(&rows, format);
    print_line(&counter_text(visible_count), format);
}

pub async fn filter(args: FilterArgs, format: OutputFormat) -> Result<()> {
    let products = load_catalog(args.catalog.as_deref())?;
    let label = CounterLabel::new();
    let mut live = LiveFilter::new(cards(&products)).with_counter(label.clone());

    let result = live.apply(&args.query);
    debug!(
        "Query {:?}: {} shown, {} dimmed",
        args.query,
        result.visible_count,
        result.hidden_count()
    );

    let rows: Vec<CardDisplay> = live.records().iter().map(CardDisplay::from).collect();
    print_rows(&rows, format);
    print_line(&label.text(), format);
    Ok(())
}

fn report_filter(
    applied: &watch::Receiver<Option<AppliedFilter>>,
    session: &FilterSession<CatalogCard>,
    format: OutputFormat,
) {
    let Some(run) = applied.borrow().clone() else {
        return;
    };
    print_line(&format!("Query: {:?}", run.query), format);
    session.with_filter(|live| print_cards(live.records(), run.result.visible_count, format));
}

fn report_search(outcomes: &watch::Receiver<Option<SearchOutcome>>, board: &ToastBoard, format: OutputFormat) {
    let Some(outcome) = outcomes.borrow().clone() else {
        return;
    };
    print_line(&format!("Search #{}: {:?}", outcome.seq, outcome.query), format);
    api::print_products(outcome.products, format);
    api::drain_toasts(board);
}

/// Feed stdin lines through the debounced session, one line per keystroke state.
/// With `api.auto_submit` set, each line also goes to the search API.
pub async fn watch(args: WatchArgs, config: &VitrineConfig, format: OutputFormat) -> Result<()> {
    let products = load_catalog(args.catalog.as_deref())?;
    let debounce = config.filter.debounce();
    let session = FilterSession::new(LiveFilter::new(cards(&products)), debounce);
    let mut applied = session.subscribe();

    let (search, board) = api::connect(config)?;
    let submitter = AutoSubmit::from_config(search, config);
    let mut outcomes = submitter.subscribe();
    if submitter.is_enabled() {
        info!("Submitting queries to {}", config.api.base_url);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("Reading queries from stdin (debounce {:?})", debounce);
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(query) => {
                    let query = query.trim_end();
                    session.schedule_filter(query);
                    submitter.query_changed(query);
                }
                None => break,
            },
            Ok(()) = applied.changed() => report_filter(&applied, &session, format),
            Ok(()) = outcomes.changed() => report_search(&outcomes, &board, format),
        }
    }

    if session.state() == DebounceState::Pending && applied.changed().await.is_ok() {
        report_filter(&applied, &session, format);
    }
    submitter.settle().await;
    if outcomes.has_changed().unwrap_or(false) {
        report_search(&outcomes, &board, format);
    }
    // Lookups that failed without a delivered result still surface
    api::drain_toasts(&board);

    session.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_catalog_defaults_to_sample() {
        assert_eq!(load_catalog(None).unwrap().len(), 6);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "Red Mug", "description": "", "price": 4.5, "category": "Kitchen"}}]"#
        )
        .unwrap();

        let products = load_catalog(Some(file.path())).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Red Mug");
        assert!(products[0].in_stock);
    }

    #[test]
    fn test_load_catalog_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_catalog(Some(file.path())).is_err());
    }

    #[test]
    fn test_card_row() {
        let products = sample_catalog();
        let row = CardDisplay::from(&CatalogCard::from(&products[0])).cells();
        assert_eq!(row[1], products[0].name);
        assert_eq!(row[4], format!("{:.2}", products[0].price));
    }
}
