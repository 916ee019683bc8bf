use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Status value the monitor treats as terminal success, compared
/// case-insensitively. Every other status is "still pending".
pub const STATUS_COMPLETED: &str = "completed";

/// A mass pay job as reported by the service.
///
/// Created on submission and updated server-side as rows are processed; the
/// client only ever reads it. `status` is an open string enumeration
/// ("Pending", "Processing", "Completed", ...) and new values may appear, so it
/// is kept as-is rather than parsed into a closed enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    #[serde(default)]
    pub user_job_id: Option<String>,
    pub uid: String,
    pub status: String,
    pub total: Decimal,
    pub fees: Decimal,
    pub rows: u32,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(
        rename = "assumeCosts",
        default,
        deserialize_with = "deserialize_flag"
    )]
    pub assume_costs: Option<bool>,
}

impl Job {
    /// Whether the job has reached terminal success.
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_COMPLETED)
    }
}

/// The service echoes submitted booleans inconsistently: sometimes as JSON
/// booleans, sometimes as the strings "true"/"false". Accept both.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        None => None,
        Some(Flag::Bool(value)) => Some(value),
        Some(Flag::Text(text)) => Some(text.eq_ignore_ascii_case("true")),
    })
}
