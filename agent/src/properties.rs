//! Flat `key=value` agent configuration.

use std::collections::BTreeMap;
use std::str::FromStr;

/// Configuration properties parsed from a flat string of
/// whitespace-separated `key=value` tokens.
///
/// Later tokens override earlier ones, so callers can prepend defaults to
/// user-supplied arguments.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Parse `"name=mcts role=black seed=7"`-style argument strings.
    /// A token without `=` becomes a key with an empty value.
    pub fn parse(args: &str) -> Self {
        let mut entries = BTreeMap::new();
        for token in args.split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) => entries.insert(key.to_string(), value.to_string()),
                None => entries.insert(token.to_string(), String::new()),
            };
        }
        Self { entries }
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Typed value for `key`; `None` when the key is missing or the value
    /// fails to parse.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|value| value.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_tokens() {
        let props = Properties::parse("name=demo role=black seed=42");
        assert_eq!(props.get("name"), Some("demo"));
        assert_eq!(props.get("role"), Some("black"));
        assert_eq!(props.get("seed"), Some("42"));
        assert_eq!(props.get("missing"), None);
    }

    #[test]
    fn test_later_tokens_override() {
        let props = Properties::parse("name=random role=unknown name=mcts role=white");
        assert_eq!(props.get("name"), Some("mcts"));
        assert_eq!(props.get("role"), Some("white"));
    }

    #[test]
    fn test_typed_getters() {
        let props = Properties::parse("seed=42 timeout=1500 thread=8 simulation=oops");
        assert_eq!(props.get_parsed::<u64>("seed"), Some(42));
        assert_eq!(props.get_parsed::<u64>("timeout"), Some(1500));
        assert_eq!(props.get_parsed::<usize>("thread"), Some(8));
        assert_eq!(props.get_parsed::<u32>("simulation"), None);
        assert_eq!(props.get_parsed::<u32>("absent"), None);
    }

    #[test]
    fn test_bare_token_is_empty_value() {
        let props = Properties::parse("verbose name=x");
        assert_eq!(props.get("verbose"), Some(""));
        assert_eq!(props.get("name"), Some("x"));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(Properties::parse("").get("name"), None);
        let props = Properties::parse("   name=a    role=white   ");
        assert_eq!(props.get("name"), Some("a"));
        assert_eq!(props.get("role"), Some("white"));
    }
}
