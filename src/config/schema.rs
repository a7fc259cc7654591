use serde::{Deserialize, Serialize};

use crate::ranking::Weights;

/// Application configuration.
///
/// Every field is optional. Example YAML:
/// ```yaml
/// store: ~/shop/store.json
/// user: 0b9f6c1e-2a8e-4a57-9a43-6f0e3f7a1d2c
/// weights:
///   profit: 40
///   sales: 40
///   cost: 20
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the store file (default: ~/.config/saw-rank/store.json)
    #[serde(default)]
    pub store: Option<String>,

    /// Default owner for product commands
    #[serde(default)]
    pub user: Option<String>,

    /// Weights used for a fresh store and for `weights reset`
    #[serde(default)]
    pub weights: Option<Weights>,
}

impl Config {
    /// Configured default weights, or 40/40/20
    pub fn default_weights(&self) -> Weights {
        self.weights.unwrap_or_default()
    }

    /// Owner filter for a command.
    ///
    /// `all` disables filtering. Otherwise an explicit owner wins over the
    /// configured `user`; with neither, every product is included.
    pub fn resolve_owner<'a>(&'a self, explicit: Option<&'a str>, all: bool) -> Option<&'a str> {
        if all {
            return None;
        }
        explicit.or(self.user.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_weights(), Weights::default());
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
weights:
  profit: 50
  sales: 30
  cost: 20
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.store.is_none());
        assert!(config.user.is_none());
        assert_eq!(config.default_weights(), Weights::new(50.0, 30.0, 20.0));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
store: /tmp/saw/store.json
user: owner-1
weights:
  profit: 40
  sales: 40
  cost: 20
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.store.as_deref(), Some("/tmp/saw/store.json"));
        assert_eq!(config.user.as_deref(), Some("owner-1"));
        assert_eq!(config.weights, Some(Weights::default()));
    }

    #[test]
    fn test_resolve_owner() {
        let config = Config {
            user: Some("owner-1".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_owner(None, false), Some("owner-1"));
        assert_eq!(config.resolve_owner(Some("owner-2"), false), Some("owner-2"));
        // unowned products stay reachable with a configured user
        assert_eq!(config.resolve_owner(None, true), None);

        let unset = Config::default();
        assert_eq!(unset.resolve_owner(None, false), None);
        assert_eq!(unset.resolve_owner(Some("owner-2"), false), Some("owner-2"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "queries: []\n";
        let result: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            store: Some("store.json".to_string()),
            user: None,
            weights: Some(Weights::new(20.0, 30.0, 50.0)),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
