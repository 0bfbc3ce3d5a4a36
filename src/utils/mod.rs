pub mod file;
pub mod http;
pub mod matcher;

// Re-export common utilities
pub use file::file_get;
pub use http::{FetchError, HttpFetcher, RulesetFetcher};
pub use matcher::starts_with_ignore_case;
