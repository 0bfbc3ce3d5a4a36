use super::http::{is_http_url, FetchError, RulesetFetcher};

/// Read a document from a local path or an HTTP(S) URL
pub fn file_get(path: &str, fetcher: &dyn RulesetFetcher) -> Result<String, FetchError> {
    if is_http_url(path) {
        return fetcher.fetch(path);
    }
    Ok(std::fs::read_to_string(path)?)
}
