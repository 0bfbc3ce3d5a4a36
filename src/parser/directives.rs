use log::{debug, info};

use crate::models::ruleset::group_rulesets;
use crate::models::{RuleGroups, RulesetConfig};
use crate::utils::{file_get, FetchError, RulesetFetcher};

/// Rulesets and proxy group definitions read from a directive file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// `ruleset=` entries in file order
    pub rulesets: Vec<RulesetConfig>,
    /// Raw `custom_proxy_group=` definitions in file order
    pub custom_proxy_groups: Vec<String>,
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load directives from INI-style `key=value` content
    ///
    /// Section headers are accepted and ignored, so a subconverter external
    /// config with a `[custom]` section reads the same as a bare list.
    pub fn load_from_ini(&mut self, content: &str) {
        for line in content.lines() {
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                continue;
            }

            if let Some((key, value)) = trimmed.split_once('=') {
                self.process_directive(key.trim(), value.trim());
            }
        }
    }

    fn process_directive(&mut self, key: &str, value: &str) {
        match key {
            "ruleset" => match RulesetConfig::parse(value) {
                Some(ruleset) => self.rulesets.push(ruleset),
                None => debug!("Skipping ruleset without a group: {}", value),
            },
            "custom_proxy_group" => self.custom_proxy_groups.push(value.to_string()),
            _ => {}
        }
    }

    /// Rulesets grouped by target, in first-seen group order
    pub fn rule_groups(&self) -> RuleGroups {
        group_rulesets(&self.rulesets)
    }
}

/// Parse directive file content
pub fn parse_directives(content: &str) -> Directives {
    let mut directives = Directives::new();
    directives.load_from_ini(content);
    directives
}

/// Read and parse a directive file from disk or an HTTP(S) URL
pub fn load_directives(path: &str, fetcher: &dyn RulesetFetcher) -> Result<Directives, FetchError> {
    let content = file_get(path, fetcher)?;
    let directives = parse_directives(&content);

    info!(
        "Loaded {} ruleset(s) and {} proxy group definition(s) from {}",
        directives.rulesets.len(),
        directives.custom_proxy_groups.len(),
        path
    );

    Ok(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
; subconverter style directives
[custom]
ruleset=🎯 直连,clash:https://example.com/LocalAreaNetwork.list
ruleset=🛑 广告拦截,https://example.com/BanAD.yaml
ruleset=🎯 直连,[]GEOIP,CN
ruleset=broken-without-comma
# ruleset=Commented,https://example.com/ignored.list
enable_rule_generator=true
custom_proxy_group=🚀 节点选择`select`[]♻️ 自动选择`[]DIRECT
custom_proxy_group=♻️ 自动选择`url-test`(.*)`http://www.gstatic.com/generate_204`300,50
"#;

    #[test]
    fn test_parse_rulesets() {
        let directives = parse_directives(SAMPLE);

        assert_eq!(directives.rulesets.len(), 3);
        assert_eq!(
            directives.rulesets[0],
            RulesetConfig::new("🎯 直连", "https://example.com/LocalAreaNetwork.list")
        );
        assert_eq!(directives.rulesets[2].url, "[]GEOIP,CN");
    }

    #[test]
    fn test_parse_proxy_groups_verbatim() {
        let directives = parse_directives(SAMPLE);

        assert_eq!(
            directives.custom_proxy_groups,
            vec![
                "🚀 节点选择`select`[]♻️ 自动选择`[]DIRECT",
                "♻️ 自动选择`url-test`(.*)`http://www.gstatic.com/generate_204`300,50",
            ]
        );
    }

    #[test]
    fn test_rule_groups_accumulate() {
        let groups = parse_directives(SAMPLE).rule_groups();

        let names: Vec<&String> = groups.keys().collect();
        assert_eq!(names, vec!["🎯 直连", "🛑 广告拦截"]);
        assert_eq!(
            groups["🎯 直连"],
            vec![
                "https://example.com/LocalAreaNetwork.list",
                "[]GEOIP,CN"
            ]
        );
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(parse_directives(""), Directives::default());
        assert_eq!(parse_directives("\n\n  ; only comments\n"), Directives::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let directives = parse_directives("surge_ruleset=Ads,https://a/b\nrename=a@b\n");
        assert!(directives.rulesets.is_empty());
        assert!(directives.custom_proxy_groups.is_empty());
    }
}
