pub mod ruleset;

pub use ruleset::fetch_ruleset;
