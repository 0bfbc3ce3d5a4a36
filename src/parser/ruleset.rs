use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value as YamlValue;

use crate::models::RulesetPayload;

lazy_static! {
    static ref LIST_MARKER: Regex = Regex::new(r"^\s*-\s*").unwrap();
}

/// Clash rule-provider document, only the `payload` list matters
#[derive(Debug, Deserialize)]
struct PayloadDocument {
    payload: Vec<YamlValue>,
}

/// Classify a downloaded ruleset body and extract its rule lines
///
/// A YAML mapping with a `payload` list is read as a rule-provider document.
/// A body that declares `payload:` but fails to parse is malformed and yields
/// nothing. Anything else is a plain list with one rule per line.
pub fn parse_ruleset_content(content: &str) -> RulesetPayload {
    if let Ok(document) = serde_yaml::from_str::<PayloadDocument>(content) {
        return RulesetPayload::Structured(normalize_payload(&document.payload));
    }

    if declares_payload(content) {
        return RulesetPayload::Malformed;
    }

    RulesetPayload::PlainText(parse_plain_rules(content))
}

fn normalize_payload(payload: &[YamlValue]) -> Vec<String> {
    payload
        .iter()
        .filter_map(YamlValue::as_str)
        .map(str::trim)
        .filter(|rule| !rule.is_empty() && !rule.starts_with('#'))
        .map(|rule| LIST_MARKER.replace(rule, "").trim().to_string())
        .filter(|rule| !rule.is_empty())
        .collect()
}

fn declares_payload(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.trim_start().to_lowercase().starts_with("payload:"))
}

fn parse_plain_rules(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_payload() {
        let body = r##"
# NAME: BanAD
payload:
  - DOMAIN-SUFFIX,ad.com
  - '- DOMAIN-SUFFIX,test.com'
  - IP-CIDR,1.0.0.0/8,no-resolve
  - "  "
  - "# disabled,rule"
  - 42
"##;
        assert_eq!(
            parse_ruleset_content(body),
            RulesetPayload::Structured(vec![
                "DOMAIN-SUFFIX,ad.com".to_string(),
                "DOMAIN-SUFFIX,test.com".to_string(),
                "IP-CIDR,1.0.0.0/8,no-resolve".to_string(),
            ])
        );
    }

    #[test]
    fn test_flow_style_payload() {
        let body = r#"payload: ["- DOMAIN-SUFFIX,test.com"]"#;
        assert_eq!(
            parse_ruleset_content(body),
            RulesetPayload::Structured(vec!["DOMAIN-SUFFIX,test.com".to_string()])
        );
    }

    #[test]
    fn test_plain_text() {
        let body = "# comment\n\nDOMAIN,example.com\n; another comment\n  google.com  \n";
        assert_eq!(
            parse_ruleset_content(body),
            RulesetPayload::PlainText(vec![
                "DOMAIN,example.com".to_string(),
                "google.com".to_string(),
            ])
        );
    }

    #[test]
    fn test_plain_text_with_ipv6() {
        let body = "IP-CIDR6,2001:db8::/32,no-resolve\nDOMAIN-KEYWORD,tracker";
        assert_eq!(
            parse_ruleset_content(body).into_rules(),
            vec!["IP-CIDR6,2001:db8::/32,no-resolve", "DOMAIN-KEYWORD,tracker"]
        );
    }

    #[test]
    fn test_malformed_payload() {
        let body = "payload:\n  - DOMAIN,a.com\n - [unbalanced";
        assert_eq!(parse_ruleset_content(body), RulesetPayload::Malformed);

        // a payload key that is not a list
        assert_eq!(
            parse_ruleset_content("payload: just a string"),
            RulesetPayload::Malformed
        );
    }

    #[test]
    fn test_commented_payload_mention_is_plain() {
        let body = "# payload: not really\nDOMAIN,a.com";
        assert_eq!(
            parse_ruleset_content(body),
            RulesetPayload::PlainText(vec!["DOMAIN,a.com".to_string()])
        );
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(
            parse_ruleset_content(""),
            RulesetPayload::PlainText(Vec::new())
        );
    }
}
