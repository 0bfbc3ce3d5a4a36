use log::info;
use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::generator::config::group::build_proxy_groups;
use crate::generator::config::ruleconvert::ruleset_to_rules;
use crate::generator::exports::clash::{assemble_config, proxy_names};
use crate::parser::{load_directives, Directives};
use crate::settings::Settings;
use crate::utils::{file_get, RulesetFetcher};
use crate::validator::SchemaValidator;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub proxies: usize,
    pub rules: usize,
    pub groups: usize,
    pub output: String,
}

/// Load the base Clash config from disk or an HTTP(S) URL
///
/// Merge keys (`<<: *anchor`) are expanded, so merged fields reach the
/// output and the schema check.
pub fn load_base_config(path: &str, fetcher: &dyn RulesetFetcher) -> Result<YamlValue> {
    let content = file_get(path, fetcher).map_err(|source| Error::Load {
        path: path.to_string(),
        source,
    })?;
    let mut base: YamlValue = serde_yaml::from_str(&content)?;
    base.apply_merge()?;
    Ok(base)
}

/// Build the complete config from already loaded inputs
///
/// Rulesets are downloaded through `fetcher`; nothing is read from or written
/// to disk here.
pub fn render_config(
    base: &YamlValue,
    directives: &Directives,
    fetcher: &dyn RulesetFetcher,
) -> Result<YamlValue> {
    let names = proxy_names(base);
    info!("Found {} proxies in base config", names.len());

    // Group definitions fail fast, before any ruleset is downloaded
    let groups = build_proxy_groups(&directives.custom_proxy_groups, &names)?;
    let rules = ruleset_to_rules(&directives.rule_groups(), fetcher);
    info!("Generated {} rule(s)", rules.len());

    assemble_config(base, rules, &groups)
}

/// Run the whole pipeline described by `settings`
///
/// The output file is only written once the generated config passes schema
/// validation, so a failed run never leaves a half-valid file behind.
pub fn generate(settings: &Settings, fetcher: &dyn RulesetFetcher) -> Result<GenerationReport> {
    settings.validate()?;

    let validator = SchemaValidator::from_file(&settings.schema)?;

    info!("Loading base config from {}", settings.base_config);
    let base = load_base_config(&settings.base_config, fetcher)?;

    let directives =
        load_directives(&settings.directives, fetcher).map_err(|source| Error::Load {
            path: settings.directives.clone(),
            source,
        })?;

    let config = render_config(&base, &directives, fetcher)?;

    info!("Validating generated config against {}", settings.schema);
    validator.validate(&config)?;

    let yaml = serde_yaml::to_string(&config)?;
    std::fs::write(&settings.output, yaml)?;

    Ok(GenerationReport {
        proxies: proxy_names(&base).len(),
        rules: config["rules"].as_sequence().map_or(0, Vec::len),
        groups: config["proxy-groups"].as_sequence().map_or(0, Vec::len),
        output: settings.output.clone(),
    })
}
