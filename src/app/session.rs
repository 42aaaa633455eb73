//! In-progress quote session: edits, touched bookkeeping, validation, and
//! submission.
//!
//! Each edit builds a fresh state value, refreshes the derived totals, and
//! revalidates the edited field plus any cross-field dependents. State lives
//! only for the session; a successful submission resets it to defaults.

use chrono::Utc;

use crate::domain::price_table::PriceTable;
use crate::domain::quote::{Field, ProductType, QuoteFormState};
use crate::domain::validation::{FieldContext, ValidationState, validate_field};
use crate::domain::{AppError, pricing};
use crate::ports::{QuoteSubmission, SubmissionGateway};
use crate::services::render_summary;

const OVER_LIMIT_MESSAGE: &str = "Total container weight exceeds the 1000g limit";
const CAPTCHA_MESSAGE: &str = "Please complete the verification challenge";

pub struct FormSession {
    state: QuoteFormState,
    validation: ValidationState,
    table: PriceTable,
}

impl FormSession {
    /// Start an empty session.
    pub fn new(table: PriceTable) -> Self {
        Self::from_state(QuoteFormState::default(), table)
    }

    /// Resume from a loaded draft; derived totals are refreshed immediately.
    pub fn from_state(state: QuoteFormState, table: PriceTable) -> Self {
        let state = state.recompute_derived(&table);
        Self { state, validation: ValidationState::default(), table }
    }

    pub fn state(&self) -> &QuoteFormState {
        &self.state
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn price_table(&self) -> &PriceTable {
        &self.table
    }

    /// Apply one field edit. The field is marked touched and revalidated,
    /// along with cross-field dependents (confirm email follows email, the
    /// product link requirement follows the yes/no answer).
    pub fn edit(&mut self, field: Field, value: &str) {
        let state = std::mem::take(&mut self.state);
        self.state = state.with_field(field, value).recompute_derived(&self.table);

        self.validation.touch(field);
        self.revalidate(field);
        match field {
            Field::Email => self.revalidate(Field::ConfirmEmail),
            Field::HasExistingProduct => self.revalidate(Field::ExistingProductLink),
            _ => {}
        }
    }

    /// Append an empty ingredient row to the active product block.
    pub fn add_ingredient(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.state = state.with_ingredient_added().recompute_derived(&self.table);
        self.revalidate(Field::Ingredients);
    }

    /// Remove an ingredient row from the active product block.
    pub fn remove_ingredient(&mut self, index: usize) {
        let state = std::mem::take(&mut self.state);
        self.state = state.with_ingredient_removed(index).recompute_derived(&self.table);
        self.revalidate(Field::Ingredients);
    }

    /// Change the formula or amount of one ingredient row.
    pub fn update_ingredient(&mut self, index: usize, formula: Option<&str>, amount: Option<&str>) {
        let state = std::mem::take(&mut self.state);
        self.state = state.with_ingredient(index, formula, amount).recompute_derived(&self.table);
        self.validation.touch(Field::Ingredients);
        self.revalidate(Field::Ingredients);
    }

    /// Catalog formulas still selectable for a row: everything not already
    /// chosen by another row.
    pub fn available_formulas(&self, row_index: usize) -> Vec<String> {
        let chosen: Vec<&str> = self
            .state
            .active_ingredients()
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != row_index)
            .map(|(_, row)| row.formula.as_str())
            .collect();

        self.table
            .formula_names()
            .filter(|name| !chosen.contains(name))
            .map(String::from)
            .collect()
    }

    /// Fields validated for the current product selection.
    pub fn active_fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::ProductType];
        fields.extend(Field::CONTACT);
        if let Some(product_type) = self.state.product_type {
            fields.extend(Field::product_fields(product_type));
        }
        fields
    }

    fn revalidate(&mut self, field: Field) {
        let ctx = FieldContext::from_state(&self.state, &self.table);
        let error = validate_field(field, self.state.field_value(field), &ctx);
        self.validation.set(field, error);
    }

    /// Validate every active field regardless of touched state. On failure
    /// all fields are marked touched so their messages become visible.
    pub fn validate_all(&mut self) -> bool {
        let fields = self.active_fields();
        for field in &fields {
            self.revalidate(*field);
        }

        // The powder cap is a cross-field constraint between servings and
        // ingredient amounts, so it lives here rather than in the field rules.
        if self.state.product_type == Some(ProductType::Powder) {
            let quote = pricing::price_powder(&self.state.powder, &self.table);
            if quote.over_limit {
                self.validation.set(Field::Servings, Some(OVER_LIMIT_MESSAGE.to_string()));
            }
        }

        if self.validation.has_errors() {
            self.validation.touch_all(fields);
            false
        } else {
            true
        }
    }

    /// Validate and hand the quote to the gateway.
    ///
    /// A failed submission preserves the session state so the prospect can
    /// retry; success resets it to defaults.
    pub fn submit(
        &mut self,
        gateway: &dyn SubmissionGateway,
        captcha_token: &str,
    ) -> Result<(), AppError> {
        if !self.validate_all() {
            return Err(AppError::ValidationFailed { count: self.validation.error_count() });
        }

        self.validation.set(Field::CaptchaToken, None);
        if captcha_token.trim().is_empty() {
            self.validation.set(Field::CaptchaToken, Some(CAPTCHA_MESSAGE.to_string()));
            self.validation.touch(Field::CaptchaToken);
            return Err(AppError::MissingVerification);
        }

        let summary = render_summary(&self.state, &self.table)?;
        let submission = QuoteSubmission {
            contact: self.state.contact.clone(),
            product_type: self.state.product_type,
            powder_details: self.state.powder.clone(),
            capsule_details: self.state.capsule.clone(),
            summary,
            submitted_at: Utc::now().to_rfc3339(),
        };

        gateway.submit(&submission)?;

        self.state = QuoteFormState::default().recompute_derived(&self.table);
        self.validation.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockSubmissionGateway;

    fn session() -> FormSession {
        FormSession::new(PriceTable::builtin())
    }

    fn fill_valid_capsule_quote(session: &mut FormSession) {
        session.edit(Field::FirstName, "Ada");
        session.edit(Field::LastName, "Lovelace");
        session.edit(Field::Email, "ada@example.com");
        session.edit(Field::ConfirmEmail, "ada@example.com");
        session.edit(Field::CompanyName, "Analytical Supplements");
        session.edit(Field::City, "Austin");
        session.edit(Field::State, "TX");
        session.edit(Field::ZipCode, "78701");
        session.edit(Field::HasExistingProduct, "no");
        session.edit(Field::ProductType, "capsule");
        session.edit(Field::Quantity, "3");
        session.add_ingredient();
        session.update_ingredient(0, Some("5-HTP"), Some("600"));
    }

    #[test]
    fn edits_recompute_derived_totals() {
        let mut session = session();
        session.edit(Field::ProductType, "capsule");
        session.add_ingredient();
        session.update_ingredient(0, Some("5-HTP"), Some("650"));

        assert_eq!(session.state().capsule.total_capsules, 2);
        assert!(session.state().capsule.total_cost > 0.0);
    }

    #[test]
    fn editing_email_revalidates_confirmation() {
        let mut session = session();
        session.edit(Field::Email, "ada@example.com");
        session.edit(Field::ConfirmEmail, "ada@example.com");
        assert!(session.validation().error(Field::ConfirmEmail).is_none());

        session.edit(Field::Email, "grace@example.com");
        assert_eq!(session.validation().error(Field::ConfirmEmail), Some("Emails do not match"));
    }

    #[test]
    fn available_formulas_exclude_other_rows() {
        let mut session = session();
        session.edit(Field::ProductType, "powder");
        session.add_ingredient();
        session.update_ingredient(0, Some("5-HTP"), Some("500"));
        session.add_ingredient();

        let available = session.available_formulas(1);
        assert!(!available.contains(&"5-HTP".to_string()));
        assert!(available.contains(&"Beta Alanine".to_string()));

        // The row's own selection stays available to it.
        let own = session.available_formulas(0);
        assert!(own.contains(&"5-HTP".to_string()));
    }

    #[test]
    fn validate_all_touches_every_field_on_failure() {
        let mut session = session();
        assert!(!session.validate_all());
        assert!(session.validation().visible_error(Field::FirstName).is_some());
        assert!(session.validation().visible_error(Field::ProductType).is_some());
    }

    #[test]
    fn over_limit_powder_blocks_validation() {
        let mut session = session();
        session.edit(Field::ProductType, "powder");
        session.edit(Field::Servings, "2");
        session.add_ingredient();
        session.update_ingredient(0, Some("5-HTP"), Some("600000"));

        session.validate_all();
        assert_eq!(session.validation().error(Field::Servings), Some(OVER_LIMIT_MESSAGE));
    }

    #[test]
    fn submit_without_token_is_blocked_with_one_error() {
        let mut session = session();
        fill_valid_capsule_quote(&mut session);

        let gateway = MockSubmissionGateway::new();
        let result = session.submit(&gateway, "");

        assert!(matches!(result, Err(AppError::MissingVerification)));
        assert_eq!(gateway.submission_count(), 0);
        assert_eq!(session.validation().error_count(), 1);
        assert_eq!(session.validation().error(Field::CaptchaToken), Some(CAPTCHA_MESSAGE));
    }

    #[test]
    fn submit_with_invalid_fields_never_reaches_gateway() {
        let mut session = session();
        let gateway = MockSubmissionGateway::new();

        let result = session.submit(&gateway, "token");
        assert!(matches!(result, Err(AppError::ValidationFailed { .. })));
        assert_eq!(gateway.submission_count(), 0);
    }

    #[test]
    fn successful_submission_resets_the_session() {
        let mut session = session();
        fill_valid_capsule_quote(&mut session);

        let gateway = MockSubmissionGateway::new();
        session.submit(&gateway, "captcha-token").unwrap();

        assert_eq!(gateway.submission_count(), 1);
        let submission = gateway.last_submission().unwrap();
        assert_eq!(submission.contact.first_name, "Ada");
        assert_eq!(submission.capsule_details.total_cost, 3.02);
        assert!(submission.summary.contains("Total Price: $3.02"));

        assert_eq!(session.state(), &QuoteFormState::default().recompute_derived(session.price_table()));
        assert!(!session.validation().has_errors());
    }

    #[test]
    fn failed_submission_preserves_state_for_retry() {
        let mut session = session();
        fill_valid_capsule_quote(&mut session);

        let gateway = MockSubmissionGateway::failing("relay unavailable");
        let result = session.submit(&gateway, "captcha-token");

        assert!(matches!(result, Err(AppError::SubmissionFailed(_))));
        assert_eq!(session.state().contact.first_name, "Ada");
        assert_eq!(gateway.submission_count(), 1);
    }
}
