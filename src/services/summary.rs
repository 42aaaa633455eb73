//! Plain-text order summary rendering.
//!
//! The rendered text doubles as the message body in the submission payload,
//! mirroring the summary panel the prospect reviewed.

use minijinja::{Environment, context};

use crate::domain::price_table::PriceTable;
use crate::domain::quote::{ProductType, QuoteFormState};
use crate::domain::{AppError, pricing};

const POWDER_TEMPLATE: &str = "\
Order Summary
=============
Product Type: Powder
{%- if flavor %}
Flavor Profile: {{ flavor }}
{%- endif %}
Ingredients per serving:
{%- for row in ingredients %}
  - {{ row.formula }}: {{ row.amount }}mg
{%- endfor %}
Weight per serving: {{ weight_per_serving }}mg
Servings per container: {{ servings }}
Container weight: {{ container_weight }}mg
Number of containers: {{ quantity }}
Packaging cost: ${{ packaging_cost }}
Total Price: ${{ total }}
";

const CAPSULE_TEMPLATE: &str = "\
Order Summary
=============
Product Type: Capsules
Ingredients per bottle:
{%- for row in ingredients %}
  - {{ row.formula }}: {{ row.amount }}mg
{%- endfor %}
Fill weight: {{ total_weight }}mg
Number of capsules: {{ capsules }} (600mg per capsule)
Bottle cost: ${{ bottle_cost }}
Number of bottles: {{ quantity }}
Total Price: ${{ total }}
";

/// Render the order summary for the active product block.
pub fn render_summary(state: &QuoteFormState, table: &PriceTable) -> Result<String, AppError> {
    let product_type = state
        .product_type
        .ok_or_else(|| AppError::SummaryRender("no product type selected".to_string()))?;

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("powder", POWDER_TEMPLATE)
        .map_err(|e| AppError::SummaryRender(e.to_string()))?;
    env.add_template("capsule", CAPSULE_TEMPLATE)
        .map_err(|e| AppError::SummaryRender(e.to_string()))?;

    let rendered = match product_type {
        ProductType::Powder => {
            let quote = pricing::price_powder(&state.powder, table);
            let template =
                env.get_template("powder").map_err(|e| AppError::SummaryRender(e.to_string()))?;
            template
                .render(context! {
                    flavor => state.powder.flavor_profile.map(|f| f.as_str()),
                    ingredients => state.powder.ingredients.clone(),
                    weight_per_serving => format_mg(quote.weight_per_serving_mg),
                    servings => state.powder.servings.clone(),
                    container_weight => format_mg(quote.container_weight_mg),
                    quantity => state.powder.quantity_or_default(),
                    packaging_cost => format!("{:.2}", quote.packaging_cost),
                    total => format!("{:.2}", quote.total_cost),
                })
                .map_err(|e| AppError::SummaryRender(e.to_string()))?
        }
        ProductType::Capsule => {
            let quote = pricing::price_capsule(&state.capsule, table);
            let template =
                env.get_template("capsule").map_err(|e| AppError::SummaryRender(e.to_string()))?;
            template
                .render(context! {
                    ingredients => state.capsule.ingredients.clone(),
                    total_weight => format_mg(quote.total_weight_mg),
                    capsules => quote.capsule_count,
                    bottle_cost => format!("{:.2}", quote.bottle_cost),
                    quantity => state.capsule.quantity_or_default(),
                    total => format!("{:.2}", quote.total_cost),
                })
                .map_err(|e| AppError::SummaryRender(e.to_string()))?
        }
    };

    Ok(rendered)
}

/// Milligram figures are whole numbers in practice; keep them free of a
/// trailing `.0`.
fn format_mg(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::Field;

    #[test]
    fn powder_summary_lists_ingredients_and_total() {
        let table = PriceTable::builtin();
        let state = QuoteFormState::default()
            .with_field(Field::ProductType, "powder")
            .with_field(Field::FlavorProfile, "natural")
            .with_field(Field::Servings, "2")
            .with_field(Field::Quantity, "1")
            .with_ingredient_added()
            .with_ingredient(0, Some("5-HTP"), Some("500"));

        let summary = render_summary(&state, &table).unwrap();
        assert!(summary.contains("Product Type: Powder"));
        assert!(summary.contains("Flavor Profile: natural"));
        assert!(summary.contains("- 5-HTP: 500mg"));
        assert!(summary.contains("Container weight: 1000mg"));
        assert!(summary.contains("Total Price: $6.30"));
    }

    #[test]
    fn capsule_summary_shows_capsule_count() {
        let table = PriceTable::builtin();
        let state = QuoteFormState::default()
            .with_field(Field::ProductType, "capsule")
            .with_field(Field::Quantity, "3")
            .with_ingredient_added()
            .with_ingredient(0, Some("5-HTP"), Some("600"));

        let summary = render_summary(&state, &table).unwrap();
        assert!(summary.contains("Product Type: Capsules"));
        assert!(summary.contains("Number of capsules: 1 (600mg per capsule)"));
        assert!(summary.contains("Bottle cost: $0.40"));
        assert!(summary.contains("Total Price: $3.02"));
    }

    #[test]
    fn summary_requires_a_product_type() {
        let table = PriceTable::builtin();
        let state = QuoteFormState::default();
        assert!(render_summary(&state, &table).is_err());
    }

    #[test]
    fn powder_summary_omits_unset_flavor() {
        let table = PriceTable::builtin();
        let state = QuoteFormState::default()
            .with_field(Field::ProductType, "powder")
            .with_ingredient_added()
            .with_ingredient(0, Some("5-HTP"), Some("500"));

        let summary = render_summary(&state, &table).unwrap();
        assert!(!summary.contains("Flavor Profile"));
    }
}
