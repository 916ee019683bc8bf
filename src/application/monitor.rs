use crate::domain::job::Job;
use crate::domain::ports::StatusQuery;
use crate::error::{MasspayError, Result};
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{error, info, warn};

/// Poll interval used when the caller passes a zero interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Parameters for one monitoring session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorParams {
    /// How often to query the job status. Zero is replaced by
    /// [`DEFAULT_POLL_INTERVAL`].
    pub poll_interval: Duration,
    /// Give up after this long. `None` or zero means never time out.
    pub deadline: Option<Duration>,
    /// Server-assigned job id.
    pub job_id: Option<String>,
    /// Caller-assigned job id. Wins over `job_id` when both are set.
    pub user_job_id: Option<String>,
}

/// Terminal states of a monitoring session. `Polling` is the initial state;
/// the other three are terminal and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum MonitorState {
    Polling = 0,
    Completed = 1,
    Errored = 2,
    TimedOut = 3,
}

/// Tracks whether a session has reached a terminal state.
///
/// The repeating poll and the one-shot deadline are independently scheduled
/// and can each attempt a terminal transition; `claim` is a compare-and-set
/// from `Polling` so exactly one of them wins. An event arriving after a
/// successful claim observes a terminal session and must be discarded.
struct MonitorSession {
    state: AtomicU8,
}

impl MonitorSession {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(MonitorState::Polling as u8),
        }
    }

    /// Attempts the transition `Polling -> next`. Returns false if some other
    /// event already claimed a terminal state.
    fn claim(&self, next: MonitorState) -> bool {
        debug_assert!(next != MonitorState::Polling);
        self.state
            .compare_exchange(
                MonitorState::Polling as u8,
                next as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

/// Polls a job's status on a fixed interval until it completes, a query
/// fails, or the deadline expires.
///
/// The returned future resolves exactly once with the terminal outcome; query
/// failures are not retried, and pending observations are only logged.
pub struct JobMonitor<Q> {
    query: Q,
}

impl<Q: StatusQuery> JobMonitor<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    pub async fn run(&self, params: MonitorParams) -> Result<Job> {
        let poll_interval = if params.poll_interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            params.poll_interval
        };
        let deadline = params.deadline.filter(|deadline| !deadline.is_zero());

        let job_id = params.job_id.as_deref();
        let user_job_id = params.user_job_id.as_deref();
        info!(
            job_id = job_id.unwrap_or("none"),
            user_job_id = user_job_id.unwrap_or("none"),
            poll_interval_ms = poll_interval.as_millis() as u64,
            deadline_ms = deadline.map(|d| d.as_millis() as u64),
            "monitoring mass pay job"
        );

        let session = MonitorSession::new();
        // First poll fires one full interval after start, so a short deadline
        // can expire before any query is issued.
        let mut ticker = time::interval_at(Instant::now() + poll_interval, poll_interval);
        let mut deadline_timer = deadline.map(|deadline| Box::pin(time::sleep(deadline)));

        loop {
            let poll = async {
                ticker.tick().await;
                self.query.query_status(job_id, user_job_id).await
            };
            let polled = match deadline_timer.as_mut() {
                Some(timer) => tokio::select! {
                    polled = poll => Some(polled),
                    _ = timer.as_mut() => None,
                },
                None => Some(poll.await),
            };

            match polled {
                None => {
                    // Deadline fired; a poll that was in flight has been
                    // dropped and cannot produce a second outcome.
                    deadline_timer = None;
                    if session.claim(MonitorState::TimedOut) {
                        warn!(
                            job_id = job_id.unwrap_or("none"),
                            user_job_id = user_job_id.unwrap_or("none"),
                            "timed out waiting for mass pay job"
                        );
                        return Err(MasspayError::Timeout {
                            job_id: params.job_id.clone(),
                            user_job_id: params.user_job_id.clone(),
                        });
                    }
                }
                Some(Err(err)) => {
                    if session.claim(MonitorState::Errored) {
                        error!(
                            job_id = job_id.unwrap_or("none"),
                            user_job_id = user_job_id.unwrap_or("none"),
                            %err,
                            "mass pay status query failed"
                        );
                        return Err(err);
                    }
                }
                Some(Ok(job)) if job.is_completed() => {
                    if session.claim(MonitorState::Completed) {
                        info!(
                            job_id = job_id.unwrap_or("none"),
                            user_job_id = user_job_id.unwrap_or("none"),
                            "mass pay job completed"
                        );
                        return Ok(job);
                    }
                }
                Some(Ok(job)) => {
                    info!(
                        job_id = job_id.unwrap_or("none"),
                        user_job_id = user_job_id.unwrap_or("none"),
                        status = %job.status,
                        "mass pay job pending"
                    );
                }
            }
        }
    }
}
