use crate::prelude::*;

/// Settings for the default [`ReqwestTransport`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` = no timeout.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl TransportConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
