pub mod directives;
pub mod ruleset;

pub use directives::{load_directives, parse_directives, Directives};
pub use ruleset::parse_ruleset_content;
