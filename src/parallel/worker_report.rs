use crate::prelude::*;

/// How one dispatch worker finished.
#[derive(Debug)]
pub struct WorkerReport {
    pub worker: usize,
    /// Slots this worker claimed, including a final failed one.
    pub dispatched: usize,
    /// The error that stopped this worker early, if any.
    pub error: Option<ApiError>,
}

impl WorkerReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole [`ParallelDispatcher`] run. Workers are listed in the
/// order they finished.
#[derive(Debug)]
pub struct ParallelReport {
    pub dispatched: usize,
    pub workers: Vec<WorkerReport>,
}

impl ParallelReport {
    pub fn errors(&self) -> impl Iterator<Item = &ApiError> {
        self.workers.iter().filter_map(|w| w.error.as_ref())
    }
}
