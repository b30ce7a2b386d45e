//! API clients behind the provider traits

pub mod gemini;
pub mod yahoo;

pub use gemini::GeminiClient;
pub use yahoo::YahooQuoteProvider;
