//! Submission gateway port definition.

use std::cell::RefCell;

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::quote::{CapsuleDetails, ContactDetails, PowderDetails, ProductType};

/// The serialized quote request handed to the gateway.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    pub contact: ContactDetails,
    pub product_type: Option<ProductType>,
    pub powder_details: PowderDetails,
    pub capsule_details: CapsuleDetails,
    /// Rendered plain-text order summary, used as the message body.
    pub summary: String,
    /// RFC 3339 timestamp of the submission attempt.
    pub submitted_at: String,
}

/// Port for delivering a completed quote request to the vendor.
///
/// One attempt, fire-and-forget: implementations must not retry, and any
/// non-success outcome is terminal for that attempt.
pub trait SubmissionGateway {
    fn submit(&self, submission: &QuoteSubmission) -> Result<(), AppError>;
}

/// Capturing gateway double for tests; records every submission and can be
/// told to fail.
#[derive(Debug, Default)]
pub struct MockSubmissionGateway {
    submissions: RefCell<Vec<QuoteSubmission>>,
    fail_with: Option<String>,
}

impl MockSubmissionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every submission with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self { submissions: RefCell::new(Vec::new()), fail_with: Some(reason.into()) }
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.borrow().len()
    }

    pub fn last_submission(&self) -> Option<QuoteSubmission> {
        self.submissions.borrow().last().cloned()
    }
}

impl SubmissionGateway for MockSubmissionGateway {
    fn submit(&self, submission: &QuoteSubmission) -> Result<(), AppError> {
        self.submissions.borrow_mut().push(submission.clone());
        match &self.fail_with {
            Some(reason) => Err(AppError::SubmissionFailed(reason.clone())),
            None => Ok(()),
        }
    }
}
