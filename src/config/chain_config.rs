//! Settings shared by every node of a request graph.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! The config file is only read when `$APICHAIN_CONFIG` names one.

use crate::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Pre-fills protocol, host and port of configured nodes.
    pub env: Option<Env>,
    /// Routes configured nodes through a proxy.
    pub proxy: Option<Proxy>,
    pub transport: TransportConfig,
    pub parallel: ParallelConfig,
}

impl ChainConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::file_path() {
            Some(path) if path.exists() => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
                toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))?
            }
            _ => ChainConfig::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::ParseInlineFailed)
    }

    /// Config file path, if `$APICHAIN_CONFIG` is set.
    pub fn file_path() -> Option<PathBuf> {
        std::env::var("APICHAIN_CONFIG").ok().map(PathBuf::from)
    }

    /// Apply `APICHAIN_*` overrides read through `lookup`.
    /// Unparsable numbers are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("APICHAIN_ENV__HOST") {
            self.env.get_or_insert_with(Env::default).host = host;
        }
        if let Some(port) = lookup("APICHAIN_ENV__PORT").and_then(|v| v.parse().ok()) {
            self.env.get_or_insert_with(Env::default).port = Some(port);
        }
        if let Some(protocol) = lookup("APICHAIN_ENV__PROTOCOL") {
            self.env.get_or_insert_with(Env::default).protocol = protocol;
        }
        if let Some(host) = lookup("APICHAIN_PROXY__HOST") {
            self.proxy.get_or_insert_with(Proxy::default).host = host;
        }
        if let Some(port) = lookup("APICHAIN_PROXY__PORT").and_then(|v| v.parse().ok()) {
            self.proxy.get_or_insert_with(Proxy::default).port = Some(port);
        }
        if let Some(secs) = lookup("APICHAIN_TRANSPORT__TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.transport.timeout_secs = Some(secs);
        }
        if let Some(agent) = lookup("APICHAIN_TRANSPORT__USER_AGENT") {
            self.transport.user_agent = Some(agent);
        }
        if let Some(n) = lookup("APICHAIN_PARALLEL__COUNT_REQUEST").and_then(|v| v.parse().ok()) {
            self.parallel.count_request = n;
        }
        if let Some(n) = lookup("APICHAIN_PARALLEL__COUNT_THREAD").and_then(|v| v.parse().ok()) {
            self.parallel.count_thread = n;
        }
        if let Some(interval) = lookup("APICHAIN_PARALLEL__INTERVAL_SECS")
            .and_then(|v| v.parse::<f64>().ok())
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        {
            self.parallel.interval = interval;
        }
    }

    /// Applies env, proxy and a transport built from this config to `api`.
    pub fn apply(&self, api: Api) -> Api {
        let mut api = api.transport(Arc::new(ReqwestTransport::new(self.transport.clone())));
        if let Some(env) = &self.env {
            api = api.env(env.clone());
        }
        if let Some(proxy) = &self.proxy {
            api = api.proxy(proxy.clone());
        }
        api
    }
}
