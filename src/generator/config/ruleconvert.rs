use log::{debug, info, warn};

use crate::models::RuleGroups;
use crate::rulesets::fetch_ruleset;
use crate::utils::{starts_with_ignore_case, RulesetFetcher};

/// Second to last rule: mainland China addresses go direct
pub const GEOIP_CN_RULE: &str = "GEOIP,CN,🎯 直连";
/// Last rule: everything else falls through to the catch-all group
pub const FINAL_MATCH_RULE: &str = "MATCH,🐟 漏网之鱼";

const INLINE_GEOIP_PREFIX: &str = "[]GEOIP,";

/// Rule types that already name their target or combine other rules
const PASSTHROUGH_TYPES: [&str; 6] = ["MATCH", "FINAL", "GEOIP", "AND", "OR", "NOT"];

/// Turn an inline `[]GEOIP,<country>` source into a rule for `group`
///
/// Returns `None` for any other source and for a missing country.
pub fn inline_geoip_rule(source: &str, group: &str) -> Option<String> {
    if !starts_with_ignore_case(source, INLINE_GEOIP_PREFIX) {
        return None;
    }

    let country = source[INLINE_GEOIP_PREFIX.len()..].trim().to_uppercase();
    if country.is_empty() {
        return None;
    }
    Some(format!("GEOIP,{},{}", country, group))
}

/// Retarget one fetched rule line to `group`
///
/// Returns `None` when the line is dropped.
pub fn convert_rule_line(line: &str, group: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // USER-AGENT rules are not accepted by Clash Meta
    if starts_with_ignore_case(line, "USER-AGENT") {
        debug!("Dropping unsupported rule '{}'", line);
        return None;
    }

    let rule_type = line.split(',').next().unwrap_or(line).trim();
    if PASSTHROUGH_TYPES
        .iter()
        .any(|kind| rule_type.eq_ignore_ascii_case(kind))
    {
        return Some(line.to_string());
    }

    let mut parts = line.splitn(3, ',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(rule_type), Some(payload), extra) => {
            let mut rule = format!("{},{},{}", rule_type.trim(), payload.trim(), group);
            if let Some(extra) = extra {
                rule.push(',');
                rule.push_str(extra);
            }
            Some(rule)
        }
        // bare domain or address pattern
        _ => Some(format!("{},{}", line, group)),
    }
}

/// Build the complete `rules` list
///
/// Groups and their sources are processed in order, and the list always ends
/// with [`GEOIP_CN_RULE`] and [`FINAL_MATCH_RULE`] so every request matches.
pub fn ruleset_to_rules(groups: &RuleGroups, fetcher: &dyn RulesetFetcher) -> Vec<String> {
    let mut rules = Vec::new();

    for (group, sources) in groups.iter() {
        info!("Processing '{}' from {} source(s)", group, sources.len());
        let before = rules.len();

        for source in sources {
            if starts_with_ignore_case(source, INLINE_GEOIP_PREFIX) {
                match inline_geoip_rule(source, group) {
                    Some(rule) => rules.push(rule),
                    None => warn!("Skipping inline GEOIP rule without a country: '{}'", source),
                }
                continue;
            }

            rules.extend(
                fetch_ruleset(fetcher, source)
                    .iter()
                    .filter_map(|line| convert_rule_line(line, group)),
            );
        }

        info!("'{}' contributed {} rule(s)", group, rules.len() - before);
    }

    rules.push(GEOIP_CN_RULE.to_string());
    rules.push(FINAL_MATCH_RULE.to_string());
    rules
}
