use crate::error::{MasspayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Funding source used when a batch does not name one.
pub const DEFAULT_FUNDING_SOURCE: &str = "balance";

/// A single payment row: who gets paid and how much.
///
/// Serializes to the wire as `{destination, amount}` with the amount as a JSON
/// number, which is what the service expects in `filedata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub destination: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// A batch of payments to submit as one mass pay job.
///
/// The payment list is guaranteed non-empty by construction. The optional
/// fields are overrides; when left unset the service defaults apply, see the
/// `effective_*` accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentBatch {
    /// Email address the service sends the job report to.
    pub email: String,
    payments: Vec<Payment>,
    /// Whether the sender assumes transfer costs. Defaults to true when unset;
    /// an explicit `Some(false)` puts the costs on the recipients.
    pub assume_costs: Option<bool>,
    /// Test payments when unset or `Some(true)`, live payments on `Some(false)`.
    pub test: Option<bool>,
    /// Funding source to draw from. Defaults to "balance".
    pub source: Option<String>,
    /// Caller-assigned job id, echoed back by the service and usable as an
    /// alternate lookup key.
    pub user_job_id: Option<String>,
}

impl PaymentBatch {
    pub fn new(email: impl Into<String>, payments: Vec<Payment>) -> Result<Self> {
        if payments.is_empty() {
            return Err(MasspayError::Validation(
                "payment batch must contain at least one payment".to_string(),
            ));
        }
        Ok(Self {
            email: email.into(),
            payments,
            assume_costs: None,
            test: None,
            source: None,
            user_job_id: None,
        })
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn effective_assume_costs(&self) -> bool {
        self.assume_costs.unwrap_or(true)
    }

    pub fn effective_test(&self) -> bool {
        self.test.unwrap_or(true)
    }

    pub fn effective_source(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_FUNDING_SOURCE)
    }
}
