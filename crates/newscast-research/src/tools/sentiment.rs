//! Headline sentiment tool

use async_trait::async_trait;
use newscast_core::{Error, Result as CoreResult};
use newscast_tools::{Tool, schema};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::fmt;
use tracing::debug;
use vader_sentiment::SentimentIntensityAnalyzer;

use super::SENTIMENT_TOOL;

/// Compound score at or above which a headline reads positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound score at or below which a headline reads negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Deserialize)]
struct SentimentParams {
    headlines: Vec<String>,
}

/// Tone of one headline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// No usable score could be computed
    Error,
}

impl Sentiment {
    /// Classify a VADER compound score in `[-1, 1]`
    pub fn from_compound(score: f64) -> Self {
        if !score.is_finite() {
            Sentiment::Error
        } else if score >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Lower-case label returned to the model
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Error => "error",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Labels news headlines positive, negative or neutral
///
/// Scoring is lexicon-based and runs locally.
#[derive(Debug, Default)]
pub struct SentimentTool;

impl SentimentTool {
    /// Create the tool
    pub fn new() -> Self {
        Self
    }

    /// Label every headline, keyed by the headline text
    pub fn classify(headlines: &[String]) -> Map<String, Value> {
        let analyzer = SentimentIntensityAnalyzer::new();
        headlines
            .iter()
            .map(|headline| {
                let sentiment = analyzer
                    .polarity_scores(headline)
                    .get("compound")
                    .copied()
                    .map_or(Sentiment::Error, Sentiment::from_compound);
                (headline.clone(), Value::from(sentiment.label()))
            })
            .collect()
    }
}

#[async_trait]
impl Tool for SentimentTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: SentimentParams = serde_json::from_value(params)
            .map_err(|e| Error::invalid_arguments(SENTIMENT_TOOL, e))?;

        debug!(headlines = params.headlines.len(), "Scoring headline sentiment");
        Ok(Value::Object(Self::classify(&params.headlines)))
    }

    fn name(&self) -> &str {
        SENTIMENT_TOOL
    }

    fn description(&self) -> &str {
        "Analyze the sentiment of news headlines. Returns a map from each headline \
         to 'positive', 'negative' or 'neutral'."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "headlines": schema::array(
                    "News headlines, e.g. ['Apple announces new product', 'Market crashes']",
                    schema::string("Headline text"),
                ),
            }),
            &["headlines"],
        )
    }
}
