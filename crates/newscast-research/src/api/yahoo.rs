//! Yahoo Finance quote client

use crate::error::{ResearchError, Result};
use crate::providers::{QuoteProvider, QuoteSnapshot};
use async_trait::async_trait;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Quote provider backed by Yahoo Finance daily bars
///
/// The daily change is computed from the last two daily closes.
#[derive(Debug, Clone, Default)]
pub struct YahooQuoteProvider {}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }
}

/// Snapshot from a series of daily closes, oldest first
///
/// Needs two positive, finite closes; anything less has no usable change.
pub(crate) fn snapshot_from_closes(symbol: &str, closes: &[f64]) -> Option<QuoteSnapshot> {
    let [.., previous, last] = closes else {
        return None;
    };
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(*previous) || !usable(*last) {
        return None;
    }

    Some(QuoteSnapshot {
        symbol: symbol.to_string(),
        price: *last,
        change_percent: (last - previous) / previous * 100.0,
    })
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    async fn snapshot(&self, symbol: &str) -> Result<Option<QuoteSnapshot>> {
        let provider =
            yahoo::YahooConnector::new().map_err(|e| ResearchError::quote(symbol, e))?;

        let response = provider
            .get_quote_range(symbol, "1d", "5d")
            .await
            .map_err(|e| ResearchError::quote(symbol, e))?;

        let quotes = response
            .quotes()
            .map_err(|e| ResearchError::quote(symbol, e))?;

        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
        debug!(symbol = %symbol, bars = closes.len(), "Fetched daily bars");
        Ok(snapshot_from_closes(symbol, &closes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_closes() {
        let snapshot = snapshot_from_closes("NVDA", &[900.0, 935.96, 950.0]).unwrap();
        assert_eq!(snapshot.symbol, "NVDA");
        assert!((snapshot.price - 950.0).abs() < f64::EPSILON);
        assert!((snapshot.change_percent - 1.5).abs() < 0.01);
    }

    #[test]
    fn test_snapshot_needs_two_usable_closes() {
        assert!(snapshot_from_closes("X", &[]).is_none());
        assert!(snapshot_from_closes("X", &[10.0]).is_none());
        assert!(snapshot_from_closes("X", &[0.0, 10.0]).is_none());
        assert!(snapshot_from_closes("X", &[10.0, f64::NAN]).is_none());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_snapshot() {
        let client = YahooQuoteProvider::new();
        let snapshot = client.snapshot("AAPL").await.unwrap().unwrap();
        assert_eq!(snapshot.symbol, "AAPL");
        assert!(snapshot.price > 0.0);
    }
}
