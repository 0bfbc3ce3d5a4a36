use serde::Serialize;

/// Health-check probe used when a group does not name its own
pub const DEFAULT_TEST_URL: &str = "http://www.gstatic.com/generate_204";
/// Health-check interval in seconds used when a group does not name its own
pub const DEFAULT_TEST_INTERVAL: u32 = 300;

/// Type of proxy group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProxyGroupType {
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "url-test")]
    URLTest,
    #[serde(rename = "fallback")]
    Fallback,
    #[serde(rename = "load-balance")]
    LoadBalance,
}

impl ProxyGroupType {
    /// Parse a group type, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "select" => Some(ProxyGroupType::Select),
            "url-test" => Some(ProxyGroupType::URLTest),
            "fallback" => Some(ProxyGroupType::Fallback),
            "load-balance" => Some(ProxyGroupType::LoadBalance),
            _ => None,
        }
    }

    /// Get string representation of the proxy group type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyGroupType::Select => "select",
            ProxyGroupType::URLTest => "url-test",
            ProxyGroupType::Fallback => "fallback",
            ProxyGroupType::LoadBalance => "load-balance",
        }
    }

    /// Whether the group health-checks its members
    pub fn is_test_capable(&self) -> bool {
        !matches!(self, ProxyGroupType::Select)
    }
}

/// A proxy group as written to the `proxy-groups` section
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyGroupConfig {
    /// Name of the proxy group
    pub name: String,
    /// Type of the proxy group
    #[serde(rename = "type")]
    pub group_type: ProxyGroupType,
    /// Proxy, group or policy names in this group
    pub proxies: Vec<String>,
    /// URL for testing, only set for test-capable groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Interval in seconds between tests, only set for test-capable groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Tolerance in milliseconds, omitted when zero
    #[serde(skip_serializing_if = "is_zero")]
    pub tolerance: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl ProxyGroupConfig {
    /// Create an empty group carrying the defaults of its type
    pub fn new(name: String, group_type: ProxyGroupType) -> Self {
        let (url, interval) = if group_type.is_test_capable() {
            (Some(DEFAULT_TEST_URL.to_string()), Some(DEFAULT_TEST_INTERVAL))
        } else {
            (None, None)
        };

        Self {
            name,
            group_type,
            proxies: Vec::new(),
            url,
            interval,
            tolerance: 0,
        }
    }

    /// Get string representation of the group type
    pub fn type_str(&self) -> &'static str {
        self.group_type.as_str()
    }
}

/// A collection of proxy group configurations
pub type ProxyGroupConfigs = Vec<ProxyGroupConfig>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_type_parse() {
        assert_eq!(
            ProxyGroupType::parse("URL-Test"),
            Some(ProxyGroupType::URLTest)
        );
        assert_eq!(
            ProxyGroupType::parse("load-balance"),
            Some(ProxyGroupType::LoadBalance)
        );
        assert_eq!(ProxyGroupType::parse("relay"), None);
        assert_eq!(ProxyGroupType::parse(""), None);
    }

    #[test]
    fn test_new_select_has_no_health_check() {
        let group = ProxyGroupConfig::new("Proxy".to_string(), ProxyGroupType::Select);
        assert_eq!(group.type_str(), "select");
        assert!(group.url.is_none());
        assert!(group.interval.is_none());
    }

    #[test]
    fn test_new_fallback_has_defaults() {
        let group = ProxyGroupConfig::new("Auto".to_string(), ProxyGroupType::Fallback);
        assert_eq!(group.url.as_deref(), Some(DEFAULT_TEST_URL));
        assert_eq!(group.interval, Some(300));
        assert_eq!(group.tolerance, 0);
    }

    #[test]
    fn test_serialize_skips_zero_tolerance() {
        let mut group = ProxyGroupConfig::new("Auto".to_string(), ProxyGroupType::URLTest);
        group.proxies.push("HK-1".to_string());

        let value = serde_yaml::to_value(&group).unwrap();
        assert_eq!(value["type"].as_str(), Some("url-test"));
        assert_eq!(value["interval"].as_u64(), Some(300));
        assert!(value.get("tolerance").is_none());

        group.tolerance = 50;
        let value = serde_yaml::to_value(&group).unwrap();
        assert_eq!(value["tolerance"].as_u64(), Some(50));
    }

    #[test]
    fn test_serialize_select_fields() {
        let mut group = ProxyGroupConfig::new("Region".to_string(), ProxyGroupType::Select);
        group.proxies = vec!["DIRECT".to_string(), "ProxyA".to_string()];

        let yaml = serde_yaml::to_string(&group).unwrap();
        assert_eq!(
            yaml,
            "name: Region\ntype: select\nproxies:\n- DIRECT\n- ProxyA\n"
        );
    }
}
