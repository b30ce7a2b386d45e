//! Market context tool: latest price and daily change per ticker

use async_trait::async_trait;
use newscast_core::{Error, Result as CoreResult};
use newscast_tools::{Tool, schema};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::QuoteCache;
use crate::providers::{QuoteProvider, QuoteSnapshot};

use super::FINANCIAL_TOOL;

/// Shown for every requested ticker when none of them is a real symbol
pub const NO_FINANCIAL_DATA: &str = "No financial data";

/// Shown when a symbol exists but has no usable price
pub const PRICE_NOT_AVAILABLE: &str = "Price data not available.";

/// Shown when the lookup itself failed
pub const LOOKUP_FAILED: &str = "Invalid Ticker or Data Error";

/// Placeholders the model sends for companies without a listing
const PLACEHOLDER_TICKERS: &[&str] = &["", "N/A", "NA"];

/// Outcome of one ticker lookup
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteLookup {
    /// Price and daily change were found
    Priced(QuoteSnapshot),
    /// The symbol answered without usable price data
    Missing,
    /// The lookup failed; carries the reason for logging
    Failed(String),
}

impl QuoteLookup {
    /// Text placed in the tool result for this ticker
    pub fn display(&self) -> String {
        match self {
            QuoteLookup::Priced(snapshot) => snapshot.display(),
            QuoteLookup::Missing => PRICE_NOT_AVAILABLE.to_string(),
            QuoteLookup::Failed(_) => LOOKUP_FAILED.to_string(),
        }
    }
}

/// Upper-cased, trimmed symbols with placeholders removed
pub fn normalize_tickers(tickers: &[String]) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for ticker in tickers {
        let symbol = ticker.trim().to_uppercase();
        if PLACEHOLDER_TICKERS.contains(&symbol.as_str()) || symbols.contains(&symbol) {
            continue;
        }
        symbols.push(symbol);
    }
    symbols
}

#[derive(Debug, Deserialize)]
struct FinancialParams {
    tickers: Vec<String>,
}

/// Tool fetching price and daily change for a list of tickers
///
/// Each ticker degrades on its own: a failing lookup yields a placeholder
/// for that ticker and never aborts the rest.
pub struct FinancialContextTool {
    provider: Arc<dyn QuoteProvider>,
    cache: QuoteCache,
}

impl FinancialContextTool {
    /// Create a financial context tool
    pub fn new(provider: Arc<dyn QuoteProvider>, cache: QuoteCache) -> Self {
        Self { provider, cache }
    }

    /// Look up one normalised symbol, consulting the cache first
    pub async fn lookup(&self, symbol: &str) -> QuoteLookup {
        let fetched = self
            .cache
            .get_or_fetch(symbol, || self.provider.snapshot(symbol))
            .await;

        match fetched {
            Ok(Some(snapshot)) => QuoteLookup::Priced(snapshot),
            Ok(None) => QuoteLookup::Missing,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Quote lookup failed");
                QuoteLookup::Failed(e.to_string())
            }
        }
    }

    /// Map each requested ticker to its display string
    pub async fn financial_context(&self, tickers: &[String]) -> Map<String, Value> {
        let symbols = normalize_tickers(tickers);

        if symbols.is_empty() {
            return tickers
                .iter()
                .map(|t| (t.clone(), Value::String(NO_FINANCIAL_DATA.to_string())))
                .collect();
        }

        let mut context = Map::new();
        for symbol in symbols {
            let lookup = self.lookup(&symbol).await;
            debug!(symbol = %symbol, result = ?lookup, "Resolved ticker");
            context.insert(symbol, Value::String(lookup.display()));
        }
        context
    }
}

#[async_trait]
impl Tool for FinancialContextTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: FinancialParams = serde_json::from_value(params)
            .map_err(|e| Error::invalid_arguments(FINANCIAL_TOOL, e))?;

        Ok(Value::Object(self.financial_context(&params.tickers).await))
    }

    fn name(&self) -> &str {
        FINANCIAL_TOOL
    }

    fn description(&self) -> &str {
        "Get the current stock price and daily change for a list of tickers. \
         Returns a map from ticker to a string such as '$950.00 (+1.50%)'. \
         Use 'N/A' for companies without a public listing."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "tickers": schema::array(
                    "Stock tickers, e.g. [\"NVDA\", \"MSFT\"]",
                    schema::string("Ticker symbol"),
                ),
            }),
            &["tickers"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResearchError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeQuotes {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuoteProvider for FakeQuotes {
        async fn snapshot(&self, symbol: &str) -> Result<Option<QuoteSnapshot>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match symbol {
                "NVDA" => Ok(Some(QuoteSnapshot {
                    symbol: "NVDA".to_string(),
                    price: 950.0,
                    change_percent: 1.5,
                })),
                "DELISTED" => Ok(None),
                other => Err(ResearchError::quote(other, "no such symbol")),
            }
        }
    }

    fn tool(provider: Arc<FakeQuotes>) -> FinancialContextTool {
        FinancialContextTool::new(provider, QuoteCache::new(Duration::from_secs(60)))
    }

    fn tickers(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_normalize_tickers() {
        assert_eq!(
            normalize_tickers(&tickers(&[" nvda ", "N/A", "na", "", "NVDA", "msft"])),
            vec!["NVDA", "MSFT"]
        );
    }

    #[tokio::test]
    async fn test_degrades_per_ticker() {
        let tool = tool(Arc::new(FakeQuotes::default()));

        let result = tool
            .execute(json!({"tickers": ["nvda", "DELISTED", "ZZZZ", "N/A"]}))
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({
                "NVDA": "$950.00 (+1.50%)",
                "DELISTED": PRICE_NOT_AVAILABLE,
                "ZZZZ": LOOKUP_FAILED,
            })
        );
    }

    #[tokio::test]
    async fn test_only_placeholders() {
        let provider = Arc::new(FakeQuotes::default());
        let tool = tool(provider.clone());

        let result = tool.execute(json!({"tickers": ["N/A", "na"]})).await.unwrap();

        assert_eq!(
            result,
            json!({"N/A": NO_FINANCIAL_DATA, "na": NO_FINANCIAL_DATA})
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_priced_lookups_are_cached() {
        let provider = Arc::new(FakeQuotes::default());
        let tool = tool(provider.clone());

        assert!(matches!(tool.lookup("NVDA").await, QuoteLookup::Priced(_)));
        assert!(matches!(tool.lookup("NVDA").await, QuoteLookup::Priced(_)));
        assert_eq!(tool.lookup("DELISTED").await, QuoteLookup::Missing);
        assert_eq!(tool.lookup("DELISTED").await, QuoteLookup::Missing);

        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_missing_tickers_argument() {
        let tool = tool(Arc::new(FakeQuotes::default()));
        let err = tool.execute(json!({"symbols": ["NVDA"]})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { .. }));
    }
}
