use std::path::PathBuf;

use getset::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{RedviewError, RedviewResult};

use super::{
    DEFAULT_MEDIA_ROOT, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, HOST_ENV_VAR,
    MEDIA_ROOT_ENV_VAR, PORT_ENV_VAR, PUBLIC_BASE_URL_ENV_VAR,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Configuration of the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder, PartialEq, Eq, Getters)]
#[getset(get = "pub with_prefix")]
pub struct ServiceConfig {
    /// Directory holding the `{rover}/{camera}/{sol}/{image}` tree.
    #[builder(default = PathBuf::from(DEFAULT_MEDIA_ROOT), setter(into))]
    media_root: PathBuf,

    /// Host the HTTP server binds to.
    #[builder(default = DEFAULT_SERVER_HOST.to_string(), setter(into))]
    host: String,

    /// Port the HTTP server binds to.
    #[builder(default = DEFAULT_SERVER_PORT)]
    port: u16,

    /// URL the service is reachable at. Only used for logging.
    #[builder(default, setter(strip_option, into))]
    public_base_url: Option<String>,
}

/// Values given on the command line. Each one takes precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Media root override.
    pub media_root: Option<PathBuf>,

    /// Host override.
    pub host: Option<String>,

    /// Port override.
    pub port: Option<u16>,

    /// Public base URL override.
    pub public_base_url: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ServiceConfig {
    /// Resolves the configuration from `overrides`, then the process environment, then defaults.
    pub fn from_env(overrides: ConfigOverrides) -> RedviewResult<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves the configuration from `overrides`, then `lookup`, then defaults.
    ///
    /// Blank values found through `lookup` count as unset.
    pub fn resolve(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> RedviewResult<Self> {
        let env_value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let media_root = overrides
            .media_root
            .or_else(|| env_value(MEDIA_ROOT_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_ROOT));

        let host = overrides
            .host
            .or_else(|| env_value(HOST_ENV_VAR))
            .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());

        let port = match overrides.port {
            Some(port) => port,
            None => match env_value(PORT_ENV_VAR) {
                Some(value) => value.trim().parse().map_err(|_| {
                    RedviewError::InvalidConfig(format!("{PORT_ENV_VAR} is not a port: {value}"))
                })?,
                None => DEFAULT_SERVER_PORT,
            },
        };

        let public_base_url = overrides
            .public_base_url
            .or_else(|| env_value(PUBLIC_BASE_URL_ENV_VAR));

        Ok(Self {
            media_root,
            host,
            port,
            public_base_url,
        })
    }

    /// Returns the public base URL, falling back to `http://localhost:{port}`.
    pub fn public_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
