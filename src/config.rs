// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::api::ApiVersion;
use crate::error::{BridgeError, Result};

/// Production bridge service URL
pub const BRIDGE_API: &str = "https://bridge-swap.aarc.xyz";

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "x-api-key";

/// Environment variables read by [`BridgeConfig::from_env`]
pub const API_KEY_ENV: &str = "API_KEY";
pub const BASE_URL_ENV: &str = "BRIDGE_BASE_URL";
pub const API_VERSION_ENV: &str = "BRIDGE_API_VERSION";
pub const DAPP_ID_ENV: &str = "DAPP_ID";

/// Connection settings for the bridge service.
///
/// Read-only once handed to a client. The API key is never printed by the
/// `Debug` implementation.
///
/// # Examples
///
/// ```rust
/// use deposit_bridge::{ApiVersion, BridgeConfig};
/// use std::time::Duration;
///
/// let config = BridgeConfig::new("my-api-key")
///     .with_version(ApiVersion::V4)
///     .with_dapp_id("my-dapp")
///     .with_timeout(Duration::from_secs(30));
///
/// assert_eq!(config.base_url(), "https://bridge-swap.aarc.xyz");
/// assert!(!format!("{config:?}").contains("my-api-key"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    api_key: String,
    base_url: String,
    version: ApiVersion,
    dapp_id: Option<String>,
    timeout: Option<Duration>,
}

impl BridgeConfig {
    /// Configuration for the production service with the latest API version.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BRIDGE_API.to_string(),
            version: ApiVersion::default(),
            dapp_id: None,
            timeout: None,
        }
    }

    /// Loads `.env` if present, then reads the process environment.
    ///
    /// `API_KEY` is required; `BRIDGE_BASE_URL`, `BRIDGE_API_VERSION` and
    /// `DAPP_ID` are optional.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidConfig`] when the key is missing or a
    /// value does not parse, and [`BridgeError::InvalidUrl`] for a bad base URL.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| BridgeError::InvalidConfig(format!("{API_KEY_ENV} must be set")))?;
        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }
        if let Ok(version) = std::env::var(API_VERSION_ENV) {
            config = config.with_version(version.parse()?);
        }
        if let Ok(dapp_id) = std::env::var(DAPP_ID_ENV) {
            config = config.with_dapp_id(dapp_id);
        }

        debug!(
            base_url = %config.base_url,
            version = %config.version,
            has_dapp_id = config.dapp_id.is_some(),
            event = "bridge_config_loaded"
        );

        Ok(config)
    }

    /// Points the client at another deployment.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidUrl`] unless `url` is an absolute
    /// http(s) URL.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| BridgeError::InvalidUrl {
            reason: format!("`{url}`: {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BridgeError::InvalidUrl {
                reason: format!("`{url}` is not an http(s) URL"),
            });
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Default application id sent as `dappId` by API v4.
    pub fn with_dapp_id(mut self, dapp_id: impl Into<String>) -> Self {
        self.dapp_id = Some(dapp_id.into());
        self
    }

    /// Transport timeout applied to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn dapp_id(&self) -> Option<&str> {
        self.dapp_id.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Appends an endpoint path to the base URL, keeping any path prefix the
    /// base carries.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}/", self.base_url))
            .and_then(|base| base.join(path.trim_start_matches('/')))
            .map_err(|e| BridgeError::InvalidUrl {
                reason: format!("`{path}` against `{}`: {e}", self.base_url),
            })
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("dapp_id", &self.dapp_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}
