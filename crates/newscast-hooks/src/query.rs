//! Search query syntax helpers

/// Query token restricting results to one domain
pub const SITE_PREFIX: &str = "site:";

/// Query token restricting results to the last 7 days
pub const RECENCY_TOKEN: &str = "tbs=qdr:w";

/// `site:<domain>` token for a domain
pub fn site_token(domain: &str) -> String {
    format!("{SITE_PREFIX}{domain}")
}

/// Whether the query restricts results to `domain` (case-insensitive)
pub fn has_site_token(query: &str, domain: &str) -> bool {
    query
        .to_lowercase()
        .contains(&site_token(&domain.to_lowercase()))
}

/// Domain name without its public suffix, e.g. `wikipedia` for `wikipedia.org`
pub fn domain_stem(domain: &str) -> &str {
    domain.rsplit_once('.').map_or(domain, |(stem, _)| stem)
}

/// Append `extra` to `query`, separated by one space
///
/// An empty query yields `extra` alone.
pub fn append_clause(query: &str, extra: &str) -> String {
    let trimmed = query.trim_end();
    if trimmed.is_empty() {
        extra.to_string()
    } else {
        format!("{trimmed} {extra}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_token_case_insensitive() {
        assert!(has_site_token("AI news SITE:TechCrunch.com", "techcrunch.com"));
        assert!(!has_site_token("AI news techcrunch.com", "techcrunch.com"));
    }

    #[test]
    fn test_domain_stem() {
        assert_eq!(domain_stem("wikipedia.org"), "wikipedia");
        assert_eq!(domain_stem("technologyreview.com"), "technologyreview");
        assert_eq!(domain_stem("news.bbc.co.uk"), "news.bbc.co");
        assert_eq!(domain_stem("localhost"), "localhost");
    }

    #[test]
    fn test_append_clause() {
        assert_eq!(append_clause("ai news", RECENCY_TOKEN), "ai news tbs=qdr:w");
        assert_eq!(append_clause("", RECENCY_TOKEN), "tbs=qdr:w");
        assert_eq!(append_clause("ai news  ", RECENCY_TOKEN), "ai news tbs=qdr:w");
    }
}
