//! Concrete interception policies
//!
//! - [`DomainAllowList`] and [`DomainBlockList`] constrain which sources a
//!   search may target (configure one or the other, see [`crate::SourcePolicy`])
//! - [`FreshnessFilter`] limits results to the last week
//! - [`SourceAnnotator`] records cited domains and returns the audit log with
//!   the search text

mod allow_list;
mod block_list;
mod freshness;
mod sources;

pub use allow_list::{DEFAULT_ALLOWED_DOMAINS, DomainAllowList};
pub use block_list::{DEFAULT_BLOCKED_DOMAINS, DomainBlockList};
pub use freshness::FreshnessFilter;
pub use sources::{SourceAnnotator, extract_source_hosts};
