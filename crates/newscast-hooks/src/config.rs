//! Declarative hook configuration
//!
//! The allow-list and block-list policies are alternatives: a [`HookConfig`]
//! selects at most one of them through [`SourcePolicy`].

use crate::DEFAULT_SEARCH_TOOL;
use crate::pipeline::HookPipeline;
use crate::policies::{
    DEFAULT_ALLOWED_DOMAINS, DEFAULT_BLOCKED_DOMAINS, DomainAllowList, DomainBlockList,
    FreshnessFilter, SourceAnnotator,
};
use serde::{Deserialize, Serialize};

/// Which source restriction applies to search queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", content = "domains", rename_all = "snake_case")]
pub enum SourcePolicy {
    /// No restriction
    #[default]
    Unrestricted,
    /// Only search these domains
    AllowList(Vec<String>),
    /// Refuse searches naming these domains
    BlockList(Vec<String>),
}

impl SourcePolicy {
    /// Allow-list of the default technology news sites
    pub fn default_allow_list() -> Self {
        Self::AllowList(DEFAULT_ALLOWED_DOMAINS.iter().map(ToString::to_string).collect())
    }

    /// Block-list of the default non-news sites
    pub fn default_block_list() -> Self {
        Self::BlockList(DEFAULT_BLOCKED_DOMAINS.iter().map(ToString::to_string).collect())
    }
}

/// Hooks to install around the search tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Tool the policies apply to
    pub search_tool: String,
    /// Source restriction
    pub source_policy: SourcePolicy,
    /// Append the last-7-days recency token
    pub enforce_freshness: bool,
    /// Record cited domains and return the audit log with results
    pub annotate_sources: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            search_tool: DEFAULT_SEARCH_TOOL.to_string(),
            source_policy: SourcePolicy::Unrestricted,
            enforce_freshness: false,
            annotate_sources: false,
        }
    }
}

impl HookConfig {
    /// Configuration that installs no hooks
    pub fn passthrough() -> Self {
        Self::default()
    }
}

impl HookPipeline {
    /// Build the pipeline described by `config`
    ///
    /// Filter order is source policy first, then freshness.
    pub fn from_config(config: &HookConfig) -> Self {
        let tool = config.search_tool.as_str();
        let mut pipeline = HookPipeline::new();

        pipeline = match &config.source_policy {
            SourcePolicy::Unrestricted => pipeline,
            SourcePolicy::AllowList(domains) => {
                pipeline.with_filter(DomainAllowList::new(domains.iter().cloned()).for_tool(tool))
            }
            SourcePolicy::BlockList(domains) => {
                pipeline.with_filter(DomainBlockList::new(domains.iter().cloned()).for_tool(tool))
            }
        };

        if config.enforce_freshness {
            pipeline = pipeline.with_filter(FreshnessFilter::new().for_tool(tool));
        }
        if config.annotate_sources {
            pipeline = pipeline.with_annotator(SourceAnnotator::new().for_tool(tool));
        }
        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passthrough_builds_empty_pipeline() {
        assert!(HookPipeline::from_config(&HookConfig::passthrough()).is_empty());
    }

    #[test]
    fn test_full_config_order() {
        let config = HookConfig {
            source_policy: SourcePolicy::default_allow_list(),
            enforce_freshness: true,
            annotate_sources: true,
            ..HookConfig::default()
        };
        let pipeline = HookPipeline::from_config(&config);

        assert_eq!(
            pipeline.filter_names(),
            vec!["domain_allow_list", "freshness"]
        );
        assert_eq!(pipeline.annotator_names(), vec!["source_annotator"]);
    }

    #[test]
    fn test_block_list_config() {
        let config = HookConfig {
            source_policy: SourcePolicy::default_block_list(),
            annotate_sources: true,
            ..HookConfig::default()
        };
        let pipeline = HookPipeline::from_config(&config);
        assert_eq!(pipeline.filter_names(), vec!["domain_block_list"]);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: HookConfig = serde_json::from_value(json!({
            "source_policy": {"mode": "block_list", "domains": ["reddit.com"]},
            "annotate_sources": true
        }))
        .unwrap();

        assert_eq!(config.search_tool, "google_search");
        assert_eq!(
            config.source_policy,
            SourcePolicy::BlockList(vec!["reddit.com".to_string()])
        );
        assert!(!config.enforce_freshness);
        assert!(config.annotate_sources);
    }

    #[test]
    fn test_unrestricted_serializes_without_domains() {
        let value = serde_json::to_value(SourcePolicy::Unrestricted).unwrap();
        assert_eq!(value, json!({"mode": "unrestricted"}));
    }
}
