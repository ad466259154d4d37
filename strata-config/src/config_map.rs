//! ConfigMap - user supplied configuration values

use crate::{ConfigError, Token};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered mapping from a qualified token to a configuration value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMap {
    entries: BTreeMap<Token, Value>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object document (`{"app:key": "v", ...}`)
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(object) = value else {
            return Err(ConfigError::NotAnObject);
        };

        let mut map = ConfigMap::new();
        for (key, value) in object {
            map.insert(Token::parse_qualified(&key)?, value);
        }
        Ok(map)
    }

    /// Parse a single `key=value` pair.
    ///
    /// The value is read as JSON when it parses (`3`, `true`, `[1,2]`), otherwise as a plain string.
    pub fn parse_pair(pair: &str) -> Result<(Token, Value), ConfigError> {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidPair(pair.to_string()))?;
        let token = Token::parse_qualified(key.trim())?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok((token, value))
    }

    /// Insert a value, returning the previous one
    pub fn insert(&mut self, token: Token, value: Value) -> Option<Value> {
        self.entries.insert(token, value)
    }

    /// Merge another map into this one; entries in `other` win
    pub fn extend(&mut self, other: ConfigMap) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, token: &str) -> Option<&Value> {
        self.entries.get(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Token, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Token, Value)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (Token, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_str() {
        let map = ConfigMap::from_json_str(r#"{"app:key": "v", "app:count": 3}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("app:key"), Some(&json!("v")));
        assert_eq!(map.get("app:count"), Some(&json!(3)));
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        let err = ConfigMap::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject));
    }

    #[test]
    fn test_from_json_str_rejects_unqualified_key() {
        let err = ConfigMap::from_json_str(r#"{"key": "v"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToken(_)));
    }

    #[test]
    fn test_parse_pair() {
        let (tok, value) = ConfigMap::parse_pair("app:key=v").unwrap();
        assert_eq!(tok.as_str(), "app:key");
        assert_eq!(value, json!("v"));

        let (_, value) = ConfigMap::parse_pair("app:count=3").unwrap();
        assert_eq!(value, json!(3));

        let (_, value) = ConfigMap::parse_pair("app:url=http://x=y").unwrap();
        assert_eq!(value, json!("http://x=y"));
    }

    #[test]
    fn test_parse_pair_without_equals() {
        assert!(matches!(
            ConfigMap::parse_pair("app:key"),
            Err(ConfigError::InvalidPair(_))
        ));
    }

    #[test]
    fn test_iteration_is_ordered() {
        let map: ConfigMap = [
            (Token::new("b", "x"), json!(1)),
            (Token::new("a", "y"), json!(2)),
        ]
        .into_iter()
        .collect();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a:y", "b:x"]);
    }

    #[test]
    fn test_extend_overrides() {
        let mut base = ConfigMap::from_json_str(r#"{"app:key": "old"}"#).unwrap();
        base.extend(ConfigMap::from_json_str(r#"{"app:key": "new"}"#).unwrap());
        assert_eq!(base.get("app:key"), Some(&json!("new")));
    }
}
