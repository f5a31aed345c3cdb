//! Client configuration.
//!
//! Provides [`ClientConfig`] together with the [`Environment`] selector and the
//! optional [`Country`]. Values can be built in code through the typed builder
//! or loaded from environment variables via [`ClientConfig::from_env`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{MarketplaceError, MarketplaceResult};

/// Base URL of the production marketplace API.
pub const BASE_URL_PRODUCTION: &str = "https://marketplace.walmartapis.com";

/// Base URL of the staging marketplace API.
pub const BASE_URL_STAGING: &str =
    "https://marketplace.stg.walmartapis.com/gmp-gateway-service-app";

/// Target environment of a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// The live marketplace.
    #[default]
    Production,
    /// The staging gateway.
    Staging,
    /// No network egress; requests are answered by an in-process transport.
    Mock,
}

impl Environment {
    /// Base URL for this environment. `Mock` has none.
    #[must_use]
    pub fn base_url(self) -> Option<&'static str> {
        match self {
            Self::Production => Some(BASE_URL_PRODUCTION),
            Self::Staging => Some(BASE_URL_STAGING),
            Self::Mock => None,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for Environment {
    type Err = MarketplaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" | "stage" => Ok(Self::Staging),
            "mock" => Ok(Self::Mock),
            other => Err(MarketplaceError::Configuration(format!(
                "invalid environment: {other} (expected production, staging or mock)"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marketplace country that gets its own path segment.
///
/// Only Canada is routed through a country segment; every other code targets
/// the default (US) marketplace and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    /// The Canadian marketplace (`ca`).
    #[serde(rename = "ca")]
    Canada,
}

impl Country {
    /// Resolve a country code. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ca" => Some(Self::Canada),
            _ => None,
        }
    }

    /// The path segment value for this country.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Canada => "ca",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and transport settings for a marketplace client.
///
/// # Examples
///
/// ```
/// use walmart_core::{ClientConfig, Environment};
///
/// let config = ClientConfig::builder()
///     .consumer_id("consumer")
///     .private_key("secret")
///     .channel_type("channel")
///     .environment(Environment::Mock)
///     .build();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_retries, 3);
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Consumer ID issued by the marketplace.
    #[builder(setter(into))]
    pub consumer_id: String,

    /// Private key used to sign requests.
    #[builder(setter(into))]
    pub private_key: String,

    /// Value of the `WM_CONSUMER.CHANNEL.TYPE` header.
    #[builder(setter(into))]
    pub channel_type: String,

    /// Target environment.
    #[builder(default)]
    #[serde(default)]
    pub environment: Environment,

    /// Optional country routing.
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub country: Option<Country>,

    /// Retries for network errors and retryable 5xx responses.
    #[builder(default = 3)]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Overrides the environment's base URL.
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[builder(default = 30)]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("consumer_id", &self.consumer_id)
            .field("private_key", &"<redacted>")
            .field("channel_type", &self.channel_type)
            .field("environment", &self.environment)
            .field("country", &self.country)
            .field("max_retries", &self.max_retries)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Required | Default |
    /// |----------|----------|---------|
    /// | `WALMART_CONSUMER_ID` | yes | |
    /// | `WALMART_PRIVATE_KEY` | yes | |
    /// | `WALMART_CHANNEL_TYPE` | yes | |
    /// | `WALMART_ENV` | no | `production` |
    /// | `WALMART_COUNTRY` | no | *(none)* |
    /// | `WALMART_MAX_RETRIES` | no | `3` |
    /// | `WALMART_BASE_URL` | no | *(environment default)* |
    /// | `WALMART_TIMEOUT_SECS` | no | `30` |
    pub fn from_env() -> MarketplaceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MarketplaceResult<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| MarketplaceError::Configuration(format!("missing {key}")))
        };

        let mut config = Self::builder()
            .consumer_id(required("WALMART_CONSUMER_ID")?)
            .private_key(required("WALMART_PRIVATE_KEY")?)
            .channel_type(required("WALMART_CHANNEL_TYPE")?)
            .build();

        if let Some(v) = lookup("WALMART_ENV") {
            config.environment = v.parse()?;
        }
        if let Some(v) = lookup("WALMART_COUNTRY") {
            config.country = Country::from_code(&v);
            if config.country.is_none() {
                tracing::debug!(country = %v, "ignoring unsupported country code");
            }
        }
        if let Some(v) = lookup("WALMART_MAX_RETRIES") {
            config.max_retries = parse_number("WALMART_MAX_RETRIES", &v)?;
        }
        if let Some(v) = lookup("WALMART_BASE_URL") {
            config.base_url = Some(v);
        }
        if let Some(v) = lookup("WALMART_TIMEOUT_SECS") {
            config.timeout_secs = parse_number("WALMART_TIMEOUT_SECS", &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that all credential material is present.
    pub fn validate(&self) -> MarketplaceResult<()> {
        let missing: Vec<&str> = [
            ("consumerId", &self.consumer_id),
            ("privateKey", &self.private_key),
            ("wmConsumerChannelType", &self.channel_type),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MarketplaceError::Configuration(format!(
                "configuration missing {}",
                missing.join(", ")
            )))
        }
    }

    /// The base URL requests are sent to, if the environment has one.
    #[must_use]
    pub fn resolved_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .or_else(|| self.environment.base_url())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> MarketplaceResult<T> {
    value.trim().parse().map_err(|_| {
        MarketplaceError::Configuration(format!("invalid {key}: {value} (expected a whole number)"))
    })
}
