use serde_yaml::{self, Mapping, Value as YamlValue};

use crate::error::{Error, Result};
use crate::models::ProxyGroupConfigs;

/// Names of the proxies defined in a Clash config, in file order
///
/// Entries without a non-empty string `name` are skipped.
pub fn proxy_names(config: &YamlValue) -> Vec<String> {
    match config.get("proxies") {
        Some(YamlValue::Sequence(proxies)) => proxies
            .iter()
            .filter_map(|proxy| proxy.get("name").and_then(YamlValue::as_str))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Copy the base config with `rules` and `proxy-groups` replaced
///
/// Every other key keeps its value and position. Replaced keys keep their
/// position too; missing ones are appended.
pub fn assemble_config(
    base: &YamlValue,
    rules: Vec<String>,
    groups: &ProxyGroupConfigs,
) -> Result<YamlValue> {
    let mut config = match base {
        YamlValue::Mapping(map) => map.clone(),
        YamlValue::Null => Mapping::new(),
        _ => {
            return Err(Error::InvalidBaseConfig(
                "top level must be a mapping".to_string(),
            ))
        }
    };

    let rules = rules.into_iter().map(YamlValue::String).collect();
    config.insert(
        YamlValue::String("rules".to_string()),
        YamlValue::Sequence(rules),
    );
    config.insert(
        YamlValue::String("proxy-groups".to_string()),
        serde_yaml::to_value(groups)?,
    );

    Ok(YamlValue::Mapping(config))
}
