use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Credentials and environment selection for a connector
///
/// Immutable once built; the setters consume `self`. The key and secret are
/// wrapped in `secrecy::Secret` so neither `Debug` output nor serialization
/// can leak them.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Secret<String>,
    pub api_secret: Secret<String>,
    pub sandbox: bool,
    pub base_url: Option<String>,
}

impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Secrets are replaced wholesale; only the routing knobs survive
        #[derive(Serialize)]
        #[serde(rename = "ExchangeConfig")]
        struct Redacted<'a> {
            api_key: &'static str,
            api_secret: &'static str,
            sandbox: bool,
            base_url: &'a Option<String>,
        }

        Redacted {
            api_key: "[REDACTED]",
            api_secret: "[REDACTED]",
            sandbox: self.sandbox,
            base_url: &self.base_url,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            api_key: String,
            api_secret: String,
            #[serde(default)]
            sandbox: bool,
            #[serde(default)]
            base_url: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(raw.api_key),
            api_secret: Secret::new(raw.api_secret),
            sandbox: raw.sandbox,
            base_url: raw.base_url,
        })
    }
}

fn prefixed_var(prefix: &str, name: &str) -> String {
    format!("{}_{}", prefix.to_uppercase(), name)
}

impl ExchangeConfig {
    #[must_use]
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            api_secret: Secret::new(api_secret),
            sandbox: false,
            base_url: None,
        }
    }

    /// Read credentials from the environment
    ///
    /// Looks up `{PREFIX}_API_KEY` and `{PREFIX}_API_SECRET` (required), plus
    /// `{PREFIX}_SANDBOX` and `{PREFIX}_BASE_URL` (optional).
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let required = |name: &str| {
            let var = prefixed_var(prefix, name);
            env::var(&var).map_err(|_| ConfigError::MissingEnvironmentVariable(var))
        };

        let mut config = Self::new(required("API_KEY")?, required("API_SECRET")?);
        config.sandbox = env::var(prefixed_var(prefix, "SANDBOX"))
            .map(|raw| raw.parse().unwrap_or(false))
            .unwrap_or(false);
        config.base_url = env::var(prefixed_var(prefix, "BASE_URL")).ok();
        Ok(config)
    }

    /// Load a `.env` file, then read the same variables as `from_env`
    ///
    /// A missing file is fine (system environment variables still apply); a
    /// file that exists but cannot be parsed is an error. Keep `.env` files
    /// out of version control.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Like `from_env_file`, with an explicit file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io)) if io.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "could not load env file '{}': {}",
                    path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Credential-less configuration for public market-data endpoints
    #[must_use]
    pub fn read_only() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Whether both credentials are present, gating private endpoints
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.api_secret.expose_secret().is_empty()
    }

    /// Route requests at the sandbox environment instead of production
    #[must_use]
    pub const fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Point requests at a custom host instead of the production endpoint
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Expose the API key for signing
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Expose the API secret for signing
    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingEnvironmentVariable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_has_no_credentials() {
        let config = ExchangeConfig::read_only();
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_sandbox_defaults_to_false() {
        let config = ExchangeConfig::new("key".to_string(), "secret".to_string());
        assert!(!config.sandbox);
        assert!(config.has_credentials());
    }

    #[test]
    fn test_serialization_redacts_secrets() {
        let config = ExchangeConfig::new("my_key".to_string(), "my_secret".to_string());
        let serialized = serde_json::to_string(&config).unwrap();
        assert!(!serialized.contains("my_key"));
        assert!(!serialized.contains("my_secret"));
        assert!(serialized.contains("[REDACTED]"));
    }

    #[test]
    fn test_deserialization_defaults_optional_fields() {
        let config: ExchangeConfig =
            serde_json::from_str(r#"{"api_key": "k", "api_secret": "s"}"#).unwrap();
        assert!(!config.sandbox);
        assert!(config.base_url.is_none());
        assert_eq!(config.api_key(), "k");
    }
}
