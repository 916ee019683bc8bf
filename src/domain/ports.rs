use super::batch::PaymentBatch;
use super::job::Job;
use crate::error::Result;
use async_trait::async_trait;

/// Creates mass pay jobs on the remote service.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Submits the batch as a new job, issuing exactly one request.
    async fn create_job(&self, batch: &PaymentBatch) -> Result<Job>;
}

/// Looks up the current state of a mass pay job.
///
/// Exactly one of the two identifiers is used per request; `user_job_id` wins
/// when both are supplied.
#[async_trait]
pub trait StatusQuery: Send + Sync {
    async fn query_status(
        &self,
        job_id: Option<&str>,
        user_job_id: Option<&str>,
    ) -> Result<Job>;
}
