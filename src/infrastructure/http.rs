use crate::config::Config;
use crate::domain::batch::{Payment, PaymentBatch};
use crate::domain::job::Job;
use crate::domain::ports::{JobSubmitter, StatusQuery};
use crate::error::{MasspayError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

/// URLs of the two service endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub create_job: String,
    pub job_status: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            create_job: "https://masspay.dwollalabs.com/api/create".to_string(),
            job_status: "https://masspay.dwollalabs.com/api/status".to_string(),
        }
    }
}

/// HTTP client for the mass pay service.
///
/// Implements both ports: job creation and status lookup, one POST each.
/// Certificate verification is reqwest's default and stays on.
#[derive(Clone)]
pub struct MasspayApi {
    http: reqwest::Client,
    config: Config,
    endpoints: Endpoints,
}

impl MasspayApi {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_endpoints(config, Endpoints::default())
    }

    /// Builds a client against non-default endpoints (tests, self-hosted
    /// deployments).
    pub fn with_endpoints(config: Config, endpoints: Endpoints) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            config,
            endpoints,
        })
    }

    async fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<Job> {
        let envelope: ApiEnvelope = self
            .http
            .post(url)
            .json(body)
            .send()
            .await?
            .json()
            .await?;
        envelope.into_job()
    }
}

#[async_trait]
impl JobSubmitter for MasspayApi {
    async fn create_job(&self, batch: &PaymentBatch) -> Result<Job> {
        info!(
            payments = batch.payments().len(),
            email = %batch.email,
            test = batch.effective_test(),
            user_job_id = batch.user_job_id.as_deref().unwrap_or("none"),
            "creating mass pay job"
        );
        let request = CreateJobRequest {
            token: self.config.token(),
            pin: self.config.pin(),
            email: &batch.email,
            filedata: batch.payments(),
            assume_costs: batch.effective_assume_costs(),
            test: batch.effective_test(),
            source: batch.effective_source(),
            user_job_id: batch.user_job_id.as_deref(),
        };
        self.post_json(&self.endpoints.create_job, &request).await
    }
}

#[async_trait]
impl StatusQuery for MasspayApi {
    async fn query_status(
        &self,
        job_id: Option<&str>,
        user_job_id: Option<&str>,
    ) -> Result<Job> {
        info!(
            job_id = job_id.unwrap_or("none"),
            user_job_id = user_job_id.unwrap_or("none"),
            "querying mass pay job status"
        );
        // The caller-assigned id takes precedence; only one identifier goes
        // out per request.
        let request = match (job_id, user_job_id) {
            (_, Some(user_job_id)) => StatusRequest {
                uid: self.config.uid(),
                job_id: None,
                user_job_id: Some(user_job_id),
            },
            (Some(job_id), None) => StatusRequest {
                uid: self.config.uid(),
                job_id: Some(job_id),
                user_job_id: None,
            },
            (None, None) => {
                return Err(MasspayError::Validation(
                    "either job_id or user_job_id is required".to_string(),
                ));
            }
        };
        self.post_json(&self.endpoints.job_status, &request).await
    }
}

#[derive(Serialize)]
struct CreateJobRequest<'a> {
    token: &'a str,
    pin: u32,
    email: &'a str,
    filedata: &'a [Payment],
    #[serde(rename = "assumeCosts")]
    assume_costs: bool,
    test: bool,
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_job_id: Option<&'a str>,
}

#[derive(Serialize)]
struct StatusRequest<'a> {
    uid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_job_id: Option<&'a str>,
}

/// Response envelope shared by both endpoints: `{success: true, job: {..}}` on
/// success, `{status: false, message: ".."}` on rejection.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    status: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    job: Option<Job>,
}

impl ApiEnvelope {
    fn into_job(self) -> Result<Job> {
        if self.status == Some(false) {
            return Err(MasspayError::Api(self.message.unwrap_or_else(|| {
                "unspecified mass pay service error".to_string()
            })));
        }
        self.job.ok_or_else(|| {
            MasspayError::Api("mass pay response missing job record".to_string())
        })
    }
}
