use serde::{Deserialize, Serialize};

/// Contents of `config.yaml` in the store's data directory.
///
/// ```yaml
/// user:
///   id: "42"
///   name: Lan Nguyen
///   avatar_url: https://cdn.example/lan.png
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub user: UserConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub id: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl StoreConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = StoreConfig::from_yaml(
            "user:\n  id: \"42\"\n  name: Lan Nguyen\n  avatar_url: https://cdn.example/lan.png\n",
        )
        .unwrap();

        assert_eq!(config.user.id.as_deref(), Some("42"));
        assert_eq!(config.user.name.as_deref(), Some("Lan Nguyen"));
        assert_eq!(
            config.user.avatar_url.as_deref(),
            Some("https://cdn.example/lan.png")
        );
    }

    #[test]
    fn test_parse_partial_and_empty_config() {
        let config = StoreConfig::from_yaml("user:\n  name: Minh\n").unwrap();
        assert_eq!(config.user.id, None);
        assert_eq!(config.user.name.as_deref(), Some("Minh"));

        assert_eq!(StoreConfig::from_yaml("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_parse_invalid_config() {
        assert!(StoreConfig::from_yaml("user: 42").is_err());
    }
}
