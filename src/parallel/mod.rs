mod parallel_config;
mod parallel_dispatcher;
mod worker_report;

pub use parallel_config::*;
pub use parallel_dispatcher::*;
pub use worker_report::*;
