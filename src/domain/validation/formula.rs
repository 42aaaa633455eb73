//! Formula list validation: completeness, positivity, and catalog membership.

use std::collections::BTreeSet;

use crate::domain::price_table::PriceTable;
use crate::domain::quote::IngredientRow;

/// Validate an ordered ingredient list.
///
/// Returns every violation in row order (rows are 1-indexed in messages);
/// callers such as the field validator may surface only the first. An empty
/// list yields exactly one error. Duplicate formula names are rejected here
/// as a hard rule, not just filtered out of the selection UI.
pub fn validate_rows(rows: &[IngredientRow], table: &PriceTable) -> Vec<String> {
    if rows.is_empty() {
        return vec!["At least one ingredient is required".to_string()];
    }

    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let formula = row.formula.trim();

        if formula.is_empty() {
            errors.push(format!("Select an ingredient for row {}", row_number));
        } else if !table.contains(formula) {
            errors.push(format!("Unknown ingredient '{}'", formula));
        } else if !seen.insert(formula) {
            errors.push(format!("Duplicate ingredient '{}'", formula));
        }

        let amount_valid =
            row.amount.trim().parse::<f64>().map(|mg| mg > 0.0).unwrap_or(false);
        if !amount_valid {
            let subject = if formula.is_empty() {
                format!("row {}", row_number)
            } else {
                formula.to_string()
            };
            errors.push(format!("Enter a valid weight for {}", subject));
        }
    }

    errors
}
