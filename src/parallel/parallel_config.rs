use crate::prelude::*;

/// Whether repeated dispatches share one node graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchIsolation {
    /// Every dispatch sends the same graph. Overlapping dispatches see each
    /// other's writes to previous results, headers and resolved fields.
    #[default]
    Shared,

    /// Every dispatch sends a [`Api::deep_clone`] of the graph taken when
    /// the slot is claimed.
    ClonePerDispatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Total number of sends across all workers.
    pub count_request: usize,
    /// Number of concurrent workers. 0 = nothing is sent.
    pub count_thread: usize,
    /// Pause before each send, per worker. Fractional seconds in config files.
    #[serde(rename = "interval_secs", with = "secs_f64")]
    pub interval: Duration,
    pub isolation: DispatchIsolation,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            count_request: 1,
            count_thread: 1,
            interval: Duration::ZERO,
            isolation: DispatchIsolation::Shared,
        }
    }
}

impl ParallelConfig {
    pub fn new(count_request: usize, count_thread: usize, interval: Duration) -> Self {
        Self {
            count_request,
            count_thread,
            interval,
            isolation: DispatchIsolation::Shared,
        }
    }

    pub fn with_isolation(mut self, isolation: DispatchIsolation) -> Self {
        self.isolation = isolation;
        self
    }
}

/// `Duration` as a float number of seconds.
pub(crate) mod secs_f64 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
