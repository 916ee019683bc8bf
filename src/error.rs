use thiserror::Error;

pub type Result<T> = std::result::Result<T, MasspayError>;

#[derive(Error, Debug)]
pub enum MasspayError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mass pay service rejected request: {0}")]
    Api(String),
    #[error(
        "timed out waiting for mass pay job (job_id: {}; user_job_id: {})",
        job_id.as_deref().unwrap_or("none"),
        user_job_id.as_deref().unwrap_or("none")
    )]
    Timeout {
        job_id: Option<String>,
        user_job_id: Option<String>,
    },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
