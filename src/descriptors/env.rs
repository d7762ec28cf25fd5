use crate::prelude::*;

/// Target environment, pre-fills a node's protocol, host and port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Env {
    pub host: String,
    pub port: Option<u16>,
    pub protocol: String,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: None,
            protocol: "http".to_owned(),
        }
    }
}

impl Env {
    pub fn new(host: impl Into<String>, port: Option<u16>, protocol: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: protocol.into(),
        }
    }

    /// `{protocol}://{host}[:{port}]`
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.protocol, self.host, port),
            None => format!("{}://{}", self.protocol, self.host),
        }
    }
}
