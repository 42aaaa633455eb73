//! labquote: validate, price, and submit supplement manufacturing quote requests.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;

use app::commands::{formulas, price, submit, validate};

pub use app::FormSession;
pub use app::commands::price::PriceOutcome;
pub use app::commands::validate::ValidateOutcome;
pub use domain::{
    AppError, CapsuleDetails, CapsuleQuote, ContactDetails, Field, FlavorProfile, IngredientRow,
    PowderDetails, PowderQuote, PriceTable, ProductType, QuoteConfig, QuoteFormState,
};
pub use ports::{MockSubmissionGateway, QuoteSubmission, SubmissionGateway};

fn load_config(config_path: Option<&Path>) -> Result<QuoteConfig, AppError> {
    QuoteConfig::load_or_default(config_path)
}

/// List the active ingredient catalog with per-gram prices.
pub fn formulas(config_path: Option<&Path>) -> Result<Vec<String>, AppError> {
    let config = load_config(config_path)?;
    formulas::execute(&config)
}

/// Validate a quote draft and print diagnostics for every violation.
pub fn validate(draft: &Path, config_path: Option<&Path>) -> Result<ValidateOutcome, AppError> {
    let config = load_config(config_path)?;
    validate::execute(draft, &config)
}

/// Price a quote draft and print the rendered order summary.
///
/// The draft must pass validation first; pricing an invalid draft returns
/// `AppError::ValidationFailed` after emitting the diagnostics.
pub fn price(draft: &Path, config_path: Option<&Path>) -> Result<PriceOutcome, AppError> {
    let config = load_config(config_path)?;
    price::execute(draft, &config)
}

/// Validate a quote draft and deliver it to the configured gateway.
///
/// `captcha_token` is the completed verification challenge; acquisition is
/// external and an empty token blocks the submission.
pub fn submit(
    draft: &Path,
    captcha_token: &str,
    config_path: Option<&Path>,
) -> Result<(), AppError> {
    let config = load_config(config_path)?;
    submit::execute(draft, captcha_token, &config)
}
