use crate::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinSet;

pub type EachDone = Box<dyn Fn(&WorkerReport) + Send + Sync + 'static>;
pub type AllDone = Box<dyn FnOnce(&ParallelReport) + Send + 'static>;

/// Sends a root node over and over from a pool of concurrent workers, a
/// fixed number of times in total.
///
/// Workers claim send slots from one shared counter, so exactly
/// `count_request` sends are started however the workers interleave. A worker
/// whose send fails stops claiming slots; the others carry on.
pub struct ParallelDispatcher {
    root: Api,
    config: ParallelConfig,
    on_each_done: Option<EachDone>,
    on_all_done: Option<AllDone>,
}

impl ParallelDispatcher {
    pub fn new(root: Api, config: ParallelConfig) -> Self {
        Self {
            root,
            config,
            on_each_done: None,
            on_all_done: None,
        }
    }

    /// Called once per worker, as soon as that worker is done.
    pub fn on_each_done<F>(mut self, on_each_done: F) -> Self
    where
        F: Fn(&WorkerReport) + Send + Sync + 'static,
    {
        self.on_each_done = Some(Box::new(on_each_done));
        self
    }

    /// Called once, after every worker is done.
    pub fn on_all_done<F>(mut self, on_all_done: F) -> Self
    where
        F: FnOnce(&ParallelReport) + Send + 'static,
    {
        self.on_all_done = Some(Box::new(on_all_done));
        self
    }

    /// Runs the workers on a dedicated runtime and blocks until all of them
    /// are done. Fails with [`ApiError::Runtime`] when called from within an
    /// async runtime, use [`ParallelDispatcher::run_async`] there.
    pub fn run(self) -> Result<ParallelReport, ApiError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ApiError::Runtime {
                reason: "cannot block inside an async runtime, use run_async".to_owned(),
            });
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_time()
            .build()
            .map_err(|e| ApiError::Runtime {
                reason: e.to_string(),
            })?;
        runtime.block_on(self.run_async())
    }

    pub async fn run_async(self) -> Result<ParallelReport, ApiError> {
        let counter = Arc::new(AtomicUsize::new(0));
        info!(
            count_request = self.config.count_request,
            count_thread = self.config.count_thread,
            isolation = ?self.config.isolation,
            "starting parallel dispatch"
        );

        let mut workers = JoinSet::new();
        for worker in 0..self.config.count_thread {
            workers.spawn(run_worker(
                worker,
                self.root.clone(),
                counter.clone(),
                self.config.clone(),
            ));
        }

        let mut reports = Vec::with_capacity(self.config.count_thread);
        while let Some(joined) = workers.join_next().await {
            let report = joined.map_err(|e| ApiError::WorkerPanicked {
                reason: e.to_string(),
            })?;
            debug!(worker = report.worker, dispatched = report.dispatched, "worker done");
            if let Some(on_each_done) = &self.on_each_done {
                on_each_done(&report);
            }
            reports.push(report);
        }

        let report = ParallelReport {
            dispatched: counter.load(Ordering::SeqCst),
            workers: reports,
        };
        info!(dispatched = report.dispatched, "parallel dispatch done");
        if let Some(on_all_done) = self.on_all_done {
            on_all_done(&report);
        }
        Ok(report)
    }
}

impl Api {
    /// Prepares repeated concurrent sends of this node, see
    /// [`ParallelDispatcher`].
    pub fn send_parallel(&self, config: ParallelConfig) -> ParallelDispatcher {
        ParallelDispatcher::new(self.clone(), config)
    }
}

/// Takes one slot if any are left.
fn claim_slot(counter: &AtomicUsize, total: usize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |sent| {
            (sent < total).then_some(sent + 1)
        })
        .is_ok()
}

async fn run_worker(
    worker: usize,
    root: Api,
    counter: Arc<AtomicUsize>,
    config: ParallelConfig,
) -> WorkerReport {
    let mut dispatched = 0;
    while claim_slot(&counter, config.count_request) {
        dispatched += 1;
        tokio::time::sleep(config.interval).await;

        let node = match config.isolation {
            DispatchIsolation::Shared => root.clone(),
            DispatchIsolation::ClonePerDispatch => root.deep_clone(),
        };
        let outcome = tokio::task::spawn_blocking(move || node.send().map(|_| ())).await;

        let error = match outcome {
            Ok(Ok(())) => continue,
            Ok(Err(error)) => error,
            Err(join_error) => ApiError::WorkerPanicked {
                reason: join_error.to_string(),
            },
        };
        warn!(worker, %error, "dispatch failed, worker stops");
        return WorkerReport {
            worker,
            dispatched,
            error: Some(error),
        };
    }

    WorkerReport {
        worker,
        dispatched,
        error: None,
    }
}
