pub mod config;
pub mod exports;

// Re-export the generators used by the pipeline
pub use config::group::{build_proxy_groups, parse_proxy_group, GroupError};
pub use config::ruleconvert::{convert_rule_line, ruleset_to_rules};
pub use exports::clash::{assemble_config, proxy_names};
