//! # String-keyed configuration of one test case.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::ConfigError;

/// Ordered string→string map describing how to build one test case.
///
/// Values are stored as text; numeric settings are rendered on insertion and
/// parsed back with [`DataConfig::parse`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataConfig {
    entries: BTreeMap<String, String>,
}

/// Builds one `(key, value)` pair, rendering the value as text.
///
/// Meant for `DataConfig::from_iter([entry("n", 10), entry("mode", "tree")])`.
pub fn entry(key: impl Into<String>, value: impl Display) -> (String, String) {
    (key.into(), value.to_string())
}

impl DataConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` only if absent. Returns `false` (leaving the old value) otherwise.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value.to_string());
        true
    }

    /// Sets `key` to `value`, inserting it if absent.
    pub fn change(&mut self, key: impl Into<String>, value: impl Display) {
        self.entries.insert(key.into(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value of `key`, or `default` when absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parses the value of `key`.
    ///
    /// Fails with [`ConfigError::Missing`] if absent and
    /// [`ConfigError::Invalid`] if the text does not parse as `T`.
    pub fn parse<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.get(key).ok_or_else(|| ConfigError::Missing {
            key: key.to_string(),
        })?;
        value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    /// Removes `key`; returns whether it was present.
    pub fn erase(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for DataConfig
where
    K: Into<String>,
    V: Display,
{
    /// Later duplicates overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cfg = DataConfig::new();
        for (k, v) in iter {
            cfg.change(k, v);
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_change_get_erase() {
        let mut config = DataConfig::new();

        assert!(config.insert("one", "1"));
        assert!(config.insert("two", "2"));
        assert!(!config.insert("two", "II"));
        assert_eq!(config.get("two"), Some("2"));

        config.change("one", "I");
        config.change("two", "II");
        config.change("three", "III");

        assert_eq!(config.get("one"), Some("I"));
        assert_eq!(config.get("two"), Some("II"));
        assert_eq!(config.get("three"), Some("III"));
        assert_eq!(config.get("four"), None);
        assert_eq!(config.get_or("five", "V"), "V");

        assert!(config.erase("three"));
        assert!(!config.erase("four"));

        assert!(config.contains("two"));
        assert!(!config.contains("three"));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_from_pairs_and_entries() {
        let config = DataConfig::from_iter([("one", "1"), ("two", "2"), ("three", "3")]);
        assert_eq!(config.get("one"), Some("1"));
        assert_eq!(config.get("three"), Some("3"));

        let numeric = DataConfig::from_iter([entry("min", 0), entry("max", 1_000_000)]);
        assert_eq!(numeric.get("max"), Some("1000000"));
        assert_eq!(numeric.parse::<u64>("max").unwrap(), 1_000_000);
    }

    #[test]
    fn test_parse_reports_missing_and_invalid() {
        let config = DataConfig::from_iter([entry("n", "ten")]);
        assert_eq!(
            config.parse::<u32>("m"),
            Err(ConfigError::Missing { key: "m".into() })
        );
        match config.parse::<u32>("n") {
            Err(ConfigError::Invalid { key, value, .. }) => {
                assert_eq!(key, "n");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let config = DataConfig::from_iter([entry("b", 2), entry("a", 1)]);
        let keys: Vec<&str> = config.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
