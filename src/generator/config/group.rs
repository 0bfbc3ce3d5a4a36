//! Group generation utilities
//!
//! This module turns `custom_proxy_group` definitions into proxy groups.
//!
//! A definition is a backtick separated list: group name, group type, then
//! member tokens.
//!
//! ```text
//! 🚀 节点选择`select`[]♻️ 自动选择`[]DIRECT`Relay-1
//! ♻️ 自动选择`url-test`(HK|Hong Kong)`http://cp.cloudflare.com`600,50
//! ```

use log::{debug, info, warn};
use thiserror::Error;

use crate::models::{ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType};
use crate::utils::matcher::{build_name_matcher, filter_names};

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("malformed definition '{0}'")]
    Malformed(String),

    #[error("unknown group type '{group_type}' in '{definition}'")]
    UnknownType {
        definition: String,
        group_type: String,
    },

    #[error("invalid pattern '{pattern}' in group '{group}': {source}")]
    InvalidPattern {
        group: String,
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("invalid number '{value}' in group '{group}'")]
    InvalidNumber { group: String, value: String },
}

/// Parse one `custom_proxy_group` definition
///
/// # Arguments
///
/// * `definition` - The raw backtick separated definition
/// * `proxy_names` - Names of every proxy in the base config, in order
///
/// # Returns
///
/// The group, with `DIRECT` as its only member when nothing resolved
pub fn parse_proxy_group(
    definition: &str,
    proxy_names: &[String],
) -> Result<ProxyGroupConfig, GroupError> {
    let parts: Vec<&str> = definition.split('`').map(str::trim).collect();
    if parts.len() < 2 || parts[0].is_empty() {
        return Err(GroupError::Malformed(definition.to_string()));
    }

    let group_type =
        ProxyGroupType::parse(parts[1]).ok_or_else(|| GroupError::UnknownType {
            definition: definition.to_string(),
            group_type: parts[1].to_string(),
        })?;

    let mut group = ProxyGroupConfig::new(parts[0].to_string(), group_type);
    for token in parts[2..].iter().filter(|token| !token.is_empty()) {
        group_generate(token, &mut group, proxy_names)?;
    }

    if group.proxies.is_empty() {
        group.proxies.push("DIRECT".to_string());
    }

    Ok(group)
}

/// Apply one member token to a group
///
/// Tokens are tried in this order:
///
/// 1. `[]NAME` adds `NAME` as is (a policy such as `DIRECT` or another group)
/// 2. `(pattern)` adds every proxy whose name matches, ignoring case
/// 3. `http...` replaces the health-check URL
/// 4. `interval,tolerance` sets both, tolerance may be empty
/// 5. a bare integer sets the interval, anything else is ignored
///
/// Only rule 1 applies to `select` groups; any other token there is taken as
/// a literal member name.
pub fn group_generate(
    token: &str,
    group: &mut ProxyGroupConfig,
    proxy_names: &[String],
) -> Result<(), GroupError> {
    if let Some(target) = token.strip_prefix("[]") {
        if target.is_empty() {
            debug!("Ignoring empty target in group '{}'", group.name);
        } else {
            group.proxies.push(target.to_string());
        }
        return Ok(());
    }

    if !group.group_type.is_test_capable() {
        group.proxies.push(token.to_string());
        return Ok(());
    }

    if token.len() >= 2 && token.starts_with('(') && token.ends_with(')') {
        let pattern = &token[1..token.len() - 1];
        let matcher = build_name_matcher(pattern).map_err(|source| GroupError::InvalidPattern {
            group: group.name.clone(),
            pattern: pattern.to_string(),
            source,
        })?;

        let matched = filter_names(&matcher, proxy_names);
        if matched.is_empty() {
            warn!(
                "Pattern '{}' in group '{}' matches no proxy",
                pattern, group.name
            );
        }
        group.proxies.extend(matched);
    } else if token.starts_with("http") {
        group.url = Some(token.to_string());
    } else if let Some((interval, tolerance)) = token.split_once(',') {
        group.interval = Some(parse_number(interval, &group.name)?);
        let tolerance = tolerance.trim();
        if !tolerance.is_empty() {
            group.tolerance = parse_number(tolerance, &group.name)?;
        }
    } else if let Ok(interval) = token.parse::<u32>() {
        group.interval = Some(interval);
    } else {
        debug!("Ignoring token '{}' in group '{}'", token, group.name);
    }

    Ok(())
}

fn parse_number(value: &str, group: &str) -> Result<u32, GroupError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| GroupError::InvalidNumber {
            group: group.to_string(),
            value: value.to_string(),
        })
}

/// Parse every definition, keeping their order
///
/// The first invalid definition aborts the whole list.
pub fn build_proxy_groups(
    definitions: &[String],
    proxy_names: &[String],
) -> Result<ProxyGroupConfigs, GroupError> {
    let groups = definitions
        .iter()
        .map(|definition| parse_proxy_group(definition, proxy_names))
        .collect::<Result<ProxyGroupConfigs, _>>()?;

    info!("Generated {} proxy group(s)", groups.len());
    Ok(groups)
}
