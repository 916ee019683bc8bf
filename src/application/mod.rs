//! Application layer: the job-monitoring loop that drives repeated status
//! queries against a deadline and converges on exactly one terminal outcome.

pub mod monitor;
