//! HTTP submission gateway implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::domain::{AppError, GatewayConfig};
use crate::ports::{QuoteSubmission, SubmissionGateway};

/// Posts the quote payload to the configured mail-relay endpoint.
///
/// Exactly one attempt per submission; any non-2xx status or transport
/// failure is terminal and the caller keeps the form state for a manual
/// retry.
#[derive(Debug, Clone)]
pub struct HttpSubmissionGateway {
    endpoint: Url,
    client: Client,
}

impl HttpSubmissionGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { endpoint: config.endpoint.clone(), client })
    }
}

impl SubmissionGateway for HttpSubmissionGateway {
    fn submit(&self, submission: &QuoteSubmission) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(submission)
            .send()
            .map_err(|e| AppError::SubmissionFailed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
        Err(AppError::SubmissionFailed(format!("Gateway returned {}: {}", status.as_u16(), body)))
    }
}
