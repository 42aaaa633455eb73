//! Per-field validation rules.
//!
//! `validate_field` is pure and deterministic: the same field, value, and
//! sibling context always produce the same message. Each rule maps to a
//! distinct stable message so callers and tests can key off the text.

use url::Url;

use crate::domain::price_table::PriceTable;
use crate::domain::quote::{Field, IngredientRow, QuoteFormState};

use super::formula;

/// Sibling values a field rule may need (email confirmation, conditional
/// link requirement, formula delegation).
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub email: &'a str,
    pub has_existing_product: &'a str,
    pub ingredients: &'a [IngredientRow],
    pub table: &'a PriceTable,
}

impl<'a> FieldContext<'a> {
    pub fn from_state(state: &'a QuoteFormState, table: &'a PriceTable) -> Self {
        Self {
            email: &state.contact.email,
            has_existing_product: &state.contact.has_existing_product,
            ingredients: state.active_ingredients(),
            table,
        }
    }
}

/// Validate one field value, returning the error message if any.
pub fn validate_field(field: Field, value: &str, ctx: &FieldContext<'_>) -> Option<String> {
    match field {
        Field::FirstName | Field::LastName | Field::CompanyName | Field::City => {
            required(value, "This field is required")
        }

        Field::Email => {
            if value.trim().is_empty() {
                return Some("Email is required".to_string());
            }
            if !is_valid_email(value) {
                return Some("Please enter a valid email address".to_string());
            }
            None
        }

        Field::ConfirmEmail => {
            if value.trim().is_empty() {
                return Some("Please confirm your email".to_string());
            }
            // Case-sensitive by design: the address is used verbatim.
            if value != ctx.email {
                return Some("Emails do not match".to_string());
            }
            None
        }

        Field::CompanyWebsite => {
            if value.is_empty() {
                return None;
            }
            url_shape(value)
        }

        Field::State => {
            if value.trim().is_empty() {
                return Some("State is required".to_string());
            }
            let valid = value.chars().count() == 2 && value.chars().all(|c| c.is_alphabetic());
            if !valid {
                return Some("Please use a 2-letter state code".to_string());
            }
            None
        }

        Field::ZipCode => {
            if value.trim().is_empty() {
                return Some("ZIP code is required".to_string());
            }
            if !is_valid_zip(value) {
                return Some("Please enter a valid ZIP code".to_string());
            }
            None
        }

        Field::HasExistingProduct => {
            if value != "yes" && value != "no" {
                return Some("Please select an option".to_string());
            }
            None
        }

        Field::ExistingProductLink => {
            if ctx.has_existing_product != "yes" {
                return None;
            }
            if value.is_empty() {
                return Some("Please provide a link to your existing product".to_string());
            }
            url_shape(value)
        }

        Field::ProductType => required(value, "Please select a product type"),

        Field::FlavorProfile => required(value, "Please select a flavor profile"),

        Field::Servings => positive_count(value, "Please enter a valid number of servings"),

        Field::Quantity => positive_count(value, "Please enter a valid quantity"),

        Field::Ingredients => {
            formula::validate_rows(ctx.ingredients, ctx.table).into_iter().next()
        }

        Field::CaptchaToken => None,
    }
}

fn required(value: &str, message: &str) -> Option<String> {
    if value.trim().is_empty() { Some(message.to_string()) } else { None }
}

fn positive_count(value: &str, message: &str) -> Option<String> {
    let valid = value.trim().parse::<u32>().map(|n| n >= 1).unwrap_or(false);
    if valid { None } else { Some(message.to_string()) }
}

/// `local@domain.tld` shape: no whitespace, one `@`, at least one dot in the
/// domain with characters on both sides.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn is_valid_zip(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        10 => {
            bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[5] == b'-'
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// Must start with an explicit http(s) scheme and resolve to a dotted host.
fn url_shape(value: &str) -> Option<String> {
    let message = "Please enter a valid URL (include http:// or https://)";
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Some(message.to_string());
    }
    match Url::parse(value) {
        Ok(url) if url.host_str().is_some_and(|host| host.contains('.')) => None,
        _ => Some(message.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with<'a>(
        email: &'a str,
        has_existing_product: &'a str,
        table: &'a PriceTable,
    ) -> FieldContext<'a> {
        FieldContext { email, has_existing_product, ingredients: &[], table }
    }

    fn check(field: Field, value: &str) -> Option<String> {
        let table = PriceTable::builtin();
        validate_field(field, value, &ctx_with("", "", &table))
    }

    #[test]
    fn names_require_non_whitespace_content() {
        assert!(check(Field::FirstName, "").is_some());
        assert!(check(Field::FirstName, "   ").is_some());
        assert!(check(Field::FirstName, "Ada").is_none());
        assert!(check(Field::City, "\t").is_some());
        assert!(check(Field::CompanyName, "Rival Labs").is_none());
    }

    #[test]
    fn email_shape() {
        assert_eq!(check(Field::Email, ""), Some("Email is required".to_string()));
        assert!(check(Field::Email, "not-an-email").is_some());
        assert!(check(Field::Email, "a @b.com").is_some());
        assert!(check(Field::Email, "a@b").is_some());
        assert!(check(Field::Email, "a@b.").is_some());
        assert!(check(Field::Email, "@b.com").is_some());
        assert!(check(Field::Email, "a@b.com").is_none());
        assert!(check(Field::Email, "first.last@mail.example.org").is_none());
    }

    #[test]
    fn confirm_email_is_case_sensitive() {
        let table = PriceTable::builtin();
        let ctx = ctx_with("a@b.com", "", &table);

        assert!(validate_field(Field::ConfirmEmail, "a@b.com", &ctx).is_none());
        assert_eq!(
            validate_field(Field::ConfirmEmail, "A@b.com", &ctx),
            Some("Emails do not match".to_string())
        );
        assert_eq!(
            validate_field(Field::ConfirmEmail, "", &ctx),
            Some("Please confirm your email".to_string())
        );
    }

    #[test]
    fn company_website_is_optional_but_shaped() {
        assert!(check(Field::CompanyWebsite, "").is_none());
        assert!(check(Field::CompanyWebsite, "rivallabs.com").is_some());
        assert!(check(Field::CompanyWebsite, "ftp://rivallabs.com").is_some());
        assert!(check(Field::CompanyWebsite, "http://localhost").is_some());
        assert!(check(Field::CompanyWebsite, "https://rivallabs.com").is_none());
        assert!(check(Field::CompanyWebsite, "http://shop.rivallabs.com/catalog").is_none());
    }

    #[test]
    fn state_requires_two_letters() {
        assert!(check(Field::State, "").is_some());
        assert!(check(Field::State, "T").is_some());
        assert!(check(Field::State, "TXX").is_some());
        assert!(check(Field::State, "T1").is_some());
        assert!(check(Field::State, "TX").is_none());
        assert!(check(Field::State, "tx").is_none());
    }

    #[test]
    fn zip_accepts_five_digits_and_plus_four() {
        assert!(check(Field::ZipCode, "").is_some());
        assert!(check(Field::ZipCode, "1234").is_some());
        assert!(check(Field::ZipCode, "123456").is_some());
        assert!(check(Field::ZipCode, "12345-67").is_some());
        assert!(check(Field::ZipCode, "12345").is_none());
        assert!(check(Field::ZipCode, "12345-6789").is_none());
    }

    #[test]
    fn existing_product_link_required_only_when_yes() {
        let table = PriceTable::builtin();

        let ctx = ctx_with("", "no", &table);
        assert!(validate_field(Field::ExistingProductLink, "", &ctx).is_none());

        let ctx = ctx_with("", "yes", &table);
        assert!(validate_field(Field::ExistingProductLink, "", &ctx).is_some());
        assert!(validate_field(Field::ExistingProductLink, "not a url", &ctx).is_some());
        assert!(
            validate_field(Field::ExistingProductLink, "https://example.com/product", &ctx)
                .is_none()
        );
    }

    #[test]
    fn has_existing_product_must_be_answered() {
        assert!(check(Field::HasExistingProduct, "").is_some());
        assert!(check(Field::HasExistingProduct, "maybe").is_some());
        assert!(check(Field::HasExistingProduct, "yes").is_none());
        assert!(check(Field::HasExistingProduct, "no").is_none());
    }

    #[test]
    fn selection_fields_require_a_choice() {
        assert!(check(Field::ProductType, "").is_some());
        assert!(check(Field::ProductType, "powder").is_none());
        assert!(check(Field::FlavorProfile, "").is_some());
        assert!(check(Field::FlavorProfile, "natural").is_none());
    }

    #[test]
    fn numeric_entry_fields_require_positive_integers() {
        assert!(check(Field::Servings, "").is_some());
        assert!(check(Field::Servings, "0").is_some());
        assert!(check(Field::Servings, "-2").is_some());
        assert!(check(Field::Servings, "abc").is_some());
        assert!(check(Field::Servings, "30").is_none());
        assert!(check(Field::Quantity, "1").is_none());
    }

    #[test]
    fn ingredients_surface_only_the_first_formula_error() {
        let table = PriceTable::builtin();
        let rows =
            vec![IngredientRow::new("", ""), IngredientRow::new("5-HTP", "bad")];
        let ctx = FieldContext {
            email: "",
            has_existing_product: "",
            ingredients: &rows,
            table: &table,
        };

        assert_eq!(
            validate_field(Field::Ingredients, "", &ctx),
            Some("Select an ingredient for row 1".to_string())
        );
    }

    #[test]
    fn unknown_fields_are_always_valid() {
        assert!(check(Field::CaptchaToken, "").is_none());
    }
}
