use crate::prelude::*;

/// Proxy server a node's requests are routed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proxy {
    pub host: String,
    pub port: Option<u16>,
    pub protocol: String,
}

impl Default for Proxy {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: None,
            protocol: "http".to_owned(),
        }
    }
}

impl Proxy {
    pub fn new(host: impl Into<String>, port: Option<u16>, protocol: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            protocol: protocol.into(),
        }
    }

    pub fn url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.protocol, self.host, port),
            None => format!("{}://{}", self.protocol, self.host),
        }
    }

    /// The same proxy URL for both `http` and `https` traffic.
    pub fn to_map(&self) -> ProxyMap {
        let url = self.url();
        ProxyMap::from_iter([("http".to_owned(), url.clone()), ("https".to_owned(), url)])
    }
}
