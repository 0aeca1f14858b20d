//! Configuration for settings sync module

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Prefix of environment variables overriding file configuration
pub const ENV_PREFIX: &str = "SETTINGS_SYNC_";

/// Keys read from the environment; other `SETTINGS_SYNC_*` variables are ignored
const ENV_KEYS: &[&str] = &["server_url", "organization", "request_timeout", "user_agent"];

/// Settings sync configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the analysis server (e.g. `https://sonar.example.com`)
    #[serde(default = "default_server_url", deserialize_with = "text::required")]
    pub server_url: String,

    /// Organization scope sent along with quality profile queries
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "text::optional"
    )]
    pub organization: Option<String>,

    /// Timeout applied to every request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// User-Agent header sent to the server
    #[serde(default = "default_user_agent", deserialize_with = "text::required")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            organization: None,
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional YAML file and
    /// `SETTINGS_SYNC_*` environment variables, in increasing priority.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS))
            .extract()
    }
}

fn default_server_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_user_agent() -> String {
    format!("settings-sync/{}", env!("CARGO_PKG_VERSION"))
}

/// Text fields that also accept scalars; environment values such as
/// `1234` or `true` reach serde as numbers and booleans.
mod text {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct ScalarText;

    impl Visitor<'_> for ScalarText {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a scalar value")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    pub(super) fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(ScalarText)
    }

    pub(super) fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        required(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:9000");
        assert!(config.organization.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("settings-sync/"));
    }

    #[test]
    fn test_load_without_sources_gives_defaults() {
        Jail::expect_with(|_| {
            assert_eq!(Config::load(None)?, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_yaml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "settings-sync.yaml",
                "server_url: https://sonar.example.com\norganization: acme\nrequest_timeout: 5s\n",
            )?;

            let config = Config::load(Some(Path::new("settings-sync.yaml")))?;
            assert_eq!(config.server_url, "https://sonar.example.com");
            assert_eq!(config.organization.as_deref(), Some("acme"));
            assert_eq!(config.request_timeout, Duration::from_secs(5));
            assert_eq!(config.user_agent, default_user_agent());
            Ok(())
        });
    }

    #[test]
    fn test_unknown_file_field_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("settings-sync.yaml", "server_url: http://x\nretries: 3\n")?;

            assert!(Config::load(Some(Path::new("settings-sync.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "settings-sync.yaml",
                "server_url: https://file.example.com\nrequest_timeout: 5s\n",
            )?;
            jail.set_env("SETTINGS_SYNC_SERVER_URL", "https://env.example.com");
            jail.set_env("SETTINGS_SYNC_REQUEST_TIMEOUT", "90s");

            let config = Config::load(Some(Path::new("settings-sync.yaml")))?;
            assert_eq!(config.server_url, "https://env.example.com");
            assert_eq!(config.request_timeout, Duration::from_secs(90));
            Ok(())
        });
    }

    #[test]
    fn test_env_numeric_text_values() {
        Jail::expect_with(|jail| {
            jail.set_env("SETTINGS_SYNC_ORGANIZATION", "1234");
            jail.set_env("SETTINGS_SYNC_USER_AGENT", "42");

            let config = Config::load(None)?;
            assert_eq!(config.organization.as_deref(), Some("1234"));
            assert_eq!(config.user_agent, "42");
            Ok(())
        });
    }

    #[test]
    fn test_unrelated_env_variables_are_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("SETTINGS_SYNC_LOG_LEVEL", "debug");
            jail.set_env("SETTINGS_SYNC_ORGANIZATION", "acme");

            let config = Config::load(None)?;
            assert_eq!(config.organization.as_deref(), Some("acme"));
            Ok(())
        });
    }
}
