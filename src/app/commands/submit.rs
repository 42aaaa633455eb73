//! `labquote submit`: validate a draft and deliver it to the gateway.

use std::path::Path;

use crate::app::diagnostics::Diagnostics;
use crate::app::session::FormSession;
use crate::domain::{AppError, QuoteConfig};
use crate::services::{HttpSubmissionGateway, load_draft};

pub fn execute(draft_path: &Path, captcha_token: &str, config: &QuoteConfig) -> Result<(), AppError> {
    let table = config.price_table()?;
    let state = load_draft(draft_path)?;

    let mut session = FormSession::from_state(state, table);
    let gateway = HttpSubmissionGateway::new(&config.gateway)?;

    match session.submit(&gateway, captcha_token) {
        Ok(()) => {
            println!("✅ Quote request submitted to {}", config.gateway.endpoint);
            Ok(())
        }
        Err(error @ AppError::ValidationFailed { .. }) => {
            let mut diagnostics = Diagnostics::default();
            for (field, message) in session.validation().errors() {
                diagnostics.push_error(field.name(), message);
            }
            diagnostics.emit();
            Err(error)
        }
        Err(error) => Err(error),
    }
}
