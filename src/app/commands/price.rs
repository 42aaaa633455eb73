//! `labquote price`: compute and print the estimate for a draft.

use std::path::Path;

use crate::app::diagnostics::Diagnostics;
use crate::app::session::FormSession;
use crate::domain::quote::ProductType;
use crate::domain::{AppError, QuoteConfig, pricing};
use crate::services::{load_draft, render_summary};

/// Result of pricing a draft.
#[derive(Debug, Clone)]
pub struct PriceOutcome {
    pub total_cost: f64,
    pub summary: String,
}

pub fn execute(draft_path: &Path, config: &QuoteConfig) -> Result<PriceOutcome, AppError> {
    let table = config.price_table()?;
    let state = load_draft(draft_path)?;

    let mut session = FormSession::from_state(state, table);
    if !session.validate_all() {
        let mut diagnostics = Diagnostics::default();
        for (field, message) in session.validation().errors() {
            diagnostics.push_error(field.name(), message);
        }
        diagnostics.emit();
        return Err(AppError::ValidationFailed { count: diagnostics.error_count() });
    }

    let summary = render_summary(session.state(), session.price_table())?;
    let total_cost = match session.state().product_type {
        Some(ProductType::Capsule) => {
            pricing::price_capsule(&session.state().capsule, session.price_table()).total_cost
        }
        _ => pricing::price_powder(&session.state().powder, session.price_table()).total_cost,
    };

    println!("{}", summary);
    Ok(PriceOutcome { total_cost, summary })
}
