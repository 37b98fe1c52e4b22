// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::error::{ConfigSnafu, InvalidUrlSnafu, Result};
use snafu::{ensure, ResultExt};
use std::env;
use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const API_KEY_ENV: &str = "LITHIC_API_KEY";
pub const BASE_URL_ENV: &str = "LITHIC_BASE_URL";
pub const ENVIRONMENT_ENV: &str = "LITHIC_ENVIRONMENT";

const PRODUCTION_URL: &str = "https://api.lithic.com/v1/";
const SANDBOX_URL: &str = "https://sandbox.lithic.com/v1/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(self) -> Result<Url> {
        let url = match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Sandbox => SANDBOX_URL,
        };
        Url::parse(url).context(InvalidUrlSnafu)
    }
}

impl FromStr for Environment {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "sandbox" => Ok(Environment::Sandbox),
            other => ConfigSnafu {
                message: format!("unknown environment {}", other),
            }
            .fail(),
        }
    }
}

/// Settings shared by every request a [crate::Client] makes.
///
/// The `Debug` output never includes the API key.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub environment: Environment,
    /// Overrides the environment's URL. Always ends with `/`, so relative resource paths join
    /// beneath it.
    pub base_url: Option<Url>,
    pub timeout: Option<Duration>,
    pub default_headers: Vec<(String, String)>,
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            environment: Environment::default(),
            base_url: None,
            timeout: Some(Duration::from_secs(60)),
            default_headers: Vec::new(),
        }
    }

    /// Read the API key (required), base URL and environment from the process environment.
    ///
    /// An explicit base URL takes precedence over the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV).unwrap_or_default();
        ensure!(
            !api_key.is_empty(),
            ConfigSnafu {
                message: format!("{} is not set", API_KEY_ENV),
            }
        );
        let mut config = Self::new(api_key);
        if let Ok(environment) = env::var(ENVIRONMENT_ENV) {
            config = config.environment(environment.parse()?);
        }
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            config = config.base_url(&base_url)?;
        }
        Ok(config)
    }

    /// Target `environment`, dropping any explicit base URL.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self.base_url = None;
        self
    }

    pub fn base_url(mut self, base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url).context(InvalidUrlSnafu)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = Some(url);
        Ok(self)
    }

    /// The URL resource paths are resolved against.
    pub fn resolved_base_url(&self) -> Result<Url> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => self.environment.base_url(),
        }
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(
            !self.api_key.is_empty(),
            ConfigSnafu {
                message: "API key is empty",
            }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ClientConfig::new("key")
            .base_url("http://localhost:4010/v1")
            .unwrap();
        let url = config.resolved_base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:4010/v1/");
        assert_eq!(
            url.join("cards").unwrap().as_str(),
            "http://localhost:4010/v1/cards"
        );
    }

    #[test]
    fn environments() {
        let config = ClientConfig::new("key");
        assert_eq!(config.resolved_base_url().unwrap().as_str(), PRODUCTION_URL);

        let config = ClientConfig::new("key")
            .base_url("http://localhost:4010")
            .unwrap()
            .environment(Environment::Sandbox);
        assert_eq!(config.resolved_base_url().unwrap().as_str(), SANDBOX_URL);
        assert_eq!(
            "Sandbox".parse::<Environment>().unwrap(),
            Environment::Sandbox
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("key").validate().is_ok());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = ClientConfig::new("sk_live_secret").header("X-Team", "issuing");
        let out = format!("{:?}", config);
        assert!(!out.contains("sk_live_secret"));
        assert!(out.contains("api_key: \"***\""));
        assert!(out.contains("issuing"));
    }
}
