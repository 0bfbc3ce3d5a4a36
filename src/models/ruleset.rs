use linked_hash_map::LinkedHashMap;

/// Protocol prefixes subconverter-style configs put in front of ruleset URLs
pub const RULESET_PREFIXES: [&str; 3] = ["clash-classic:", "clash:", "mihomo:"];

/// One `ruleset=<group>,<source>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesetConfig {
    pub group: String,
    pub url: String,
}

impl RulesetConfig {
    /// Create a new ruleset configuration
    pub fn new(group: &str, url: &str) -> Self {
        Self {
            group: group.to_string(),
            url: url.to_string(),
        }
    }

    /// Parse from string in format "group,source"
    ///
    /// Only the first comma separates the group, so inline sources such as
    /// `[]GEOIP,CN` survive intact. Returns `None` when there is no comma.
    pub fn parse(value: &str) -> Option<Self> {
        let (group, source) = value.split_once(',')?;
        Some(Self::new(group.trim(), strip_ruleset_prefix(source.trim())))
    }
}

/// Remove one known protocol prefix from a ruleset source
pub fn strip_ruleset_prefix(source: &str) -> &str {
    RULESET_PREFIXES
        .iter()
        .find_map(|prefix| source.strip_prefix(prefix))
        .unwrap_or(source)
}

/// Rule group name to its ordered sources, in first-seen group order
pub type RuleGroups = LinkedHashMap<String, Vec<String>>;

/// Group ruleset entries by their target, keeping every order intact
pub fn group_rulesets(configs: &[RulesetConfig]) -> RuleGroups {
    let mut groups = RuleGroups::new();
    for config in configs {
        groups
            .entry(config.group.clone())
            .or_insert_with(Vec::new)
            .push(config.url.clone());
    }
    groups
}

/// A downloaded ruleset body, classified by its shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesetPayload {
    /// YAML document with a `payload` list
    Structured(Vec<String>),
    /// One rule per line
    PlainText(Vec<String>),
    /// Claims to be a payload document but could not be read as one
    Malformed,
}

impl RulesetPayload {
    /// Rule lines carried by the payload, empty for a malformed one
    pub fn into_rules(self) -> Vec<String> {
        match self {
            RulesetPayload::Structured(rules) | RulesetPayload::PlainText(rules) => rules,
            RulesetPayload::Malformed => Vec::new(),
        }
    }
}
