use log::{debug, error, warn};

use crate::models::RulesetPayload;
use crate::parser::parse_ruleset_content;
use crate::utils::http::{is_http_url, RulesetFetcher};

/// Fetch one ruleset source and return its raw rule lines
///
/// Sources that are not HTTP(S) URLs yield nothing without a request. A
/// failed download is logged and yields nothing, so one broken source never
/// stops the run.
pub fn fetch_ruleset(fetcher: &dyn RulesetFetcher, source: &str) -> Vec<String> {
    if !is_http_url(source) {
        warn!("Skipping unsupported ruleset source '{}'", source);
        return Vec::new();
    }

    let content = match fetcher.fetch(source) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to fetch ruleset from '{}': {}", source, e);
            return Vec::new();
        }
    };

    match parse_ruleset_content(&content) {
        RulesetPayload::Structured(rules) => {
            debug!("'{}' is a payload ruleset with {} rule(s)", source, rules.len());
            rules
        }
        RulesetPayload::PlainText(rules) => {
            debug!("'{}' is a plain ruleset with {} rule(s)", source, rules.len());
            rules
        }
        RulesetPayload::Malformed => {
            warn!("Ignoring malformed payload ruleset from '{}'", source);
            Vec::new()
        }
    }
}
