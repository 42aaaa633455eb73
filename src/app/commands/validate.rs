//! `labquote validate`: check a draft against the field and formula rules.

use std::path::Path;

use crate::app::diagnostics::Diagnostics;
use crate::app::session::FormSession;
use crate::domain::quote::{ProductType, QuoteFormState};
use crate::domain::{AppError, QuoteConfig};
use crate::services::load_draft;

/// Result of a validation run.
#[derive(Debug, Clone, Copy)]
pub struct ValidateOutcome {
    pub error_count: usize,
    pub warning_count: usize,
}

pub fn execute(draft_path: &Path, config: &QuoteConfig) -> Result<ValidateOutcome, AppError> {
    let table = config.price_table()?;
    let state = load_draft(draft_path)?;

    let mut diagnostics = Diagnostics::default();
    collect_warnings(&state, &mut diagnostics);

    let mut session = FormSession::from_state(state, table);
    session.validate_all();
    for (field, message) in session.validation().errors() {
        diagnostics.push_error(field.name(), message);
    }

    diagnostics.emit();
    if diagnostics.has_errors() {
        eprintln!("✗ {} error(s) found in {}", diagnostics.error_count(), draft_path.display());
    } else {
        println!("✅ {} is ready to submit", draft_path.display());
    }

    Ok(ValidateOutcome {
        error_count: diagnostics.error_count(),
        warning_count: diagnostics.warning_count(),
    })
}

/// Non-blocking observations about the draft.
fn collect_warnings(state: &QuoteFormState, diagnostics: &mut Diagnostics) {
    match state.product_type {
        Some(ProductType::Powder) if !state.capsule.ingredients.is_empty() => {
            diagnostics
                .push_warning("capsule", "capsule block is ignored for a powder quote");
        }
        Some(ProductType::Capsule) if !state.powder.ingredients.is_empty() => {
            diagnostics.push_warning("powder", "powder block is ignored for a capsule quote");
        }
        _ => {}
    }

    let quantity = match state.product_type {
        Some(ProductType::Capsule) => &state.capsule.quantity,
        _ => &state.powder.quantity,
    };
    if quantity.trim().is_empty() {
        diagnostics.push_warning("quantity", "quantity not set; pricing assumes 1");
    }
}
