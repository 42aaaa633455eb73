//! Pricing engine: stateless weight, capsule-count, and cost computation.
//!
//! All functions recompute from their inputs on every call. Monetary results
//! are rounded to two decimals only at the final output step; intermediate
//! sums keep full precision.

use serde::Serialize;

use crate::domain::price_table::PriceTable;
use crate::domain::quote::{CapsuleDetails, FlavorProfile, IngredientRow, PowderDetails};

const MG_PER_GRAM: f64 = 1000.0;
/// Fill capacity of one capsule.
const CAPSULE_CAPACITY_MG: f64 = 600.0;
/// Manufacturing cost per capsule.
const CAPSULE_UNIT_COST: f64 = 0.007;
/// Hard cap on powder container weight (1000 g).
const CONTAINER_CAP_MG: f64 = 1_000_000.0;

/// Stepped cost lookup: ordered `(upper bound, value)` pairs with inclusive
/// bounds, first match wins, else the fallback value.
#[derive(Debug, Clone, Copy)]
pub struct CostLadder {
    tiers: &'static [(f64, f64)],
    fallback: f64,
}

impl CostLadder {
    pub const fn new(tiers: &'static [(f64, f64)], fallback: f64) -> Self {
        Self { tiers, fallback }
    }

    pub fn lookup(&self, input: f64) -> f64 {
        for &(upper_bound, value) in self.tiers {
            if input <= upper_bound {
                return value;
            }
        }
        self.fallback
    }
}

/// Bottle cost by capsule count.
pub const BOTTLE_COST: CostLadder = CostLadder::new(&[(120.0, 0.40), (299.0, 0.80)], 1.25);

/// Powder packaging cost by container weight in grams. The fallback of 0
/// marks a container over the 1000 g cap; callers must reject it.
pub const POWDER_PACKAGING: CostLadder =
    CostLadder::new(&[(300.0, 2.80), (500.0, 4.00), (1000.0, 5.20)], 0.0);

/// Flavoring surcharge per container.
pub fn flavor_surcharge(flavor: Option<FlavorProfile>) -> f64 {
    match flavor {
        Some(FlavorProfile::Natural) => 2.50,
        Some(FlavorProfile::Artificial) => 1.75,
        None => 0.0,
    }
}

/// Pricing breakdown for a capsule quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapsuleQuote {
    /// Fill weight of one bottle in milligrams.
    pub total_weight_mg: f64,
    /// Capsules needed for one bottle.
    pub capsule_count: u32,
    pub bottle_cost: f64,
    pub capsule_cost: f64,
    /// Price for all bottles, rounded to cents.
    pub total_cost: f64,
}

/// Pricing breakdown for a powder quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowderQuote {
    pub weight_per_serving_mg: f64,
    pub container_weight_mg: f64,
    /// Servings that fit under the container cap; `None` when no ingredient
    /// weight is entered yet (no limit to hint at).
    pub max_servings: Option<u64>,
    /// Container weight exceeds the 1000 g cap; the quote must be rejected.
    pub over_limit: bool,
    pub packaging_cost: f64,
    pub flavor_cost: f64,
    /// Price for all containers, rounded to cents.
    pub total_cost: f64,
}

/// Sum of entered row amounts in milligrams.
pub fn total_weight_mg(rows: &[IngredientRow]) -> f64 {
    rows.iter().map(IngredientRow::amount_mg).sum()
}

/// Ingredient cost for one unit (bottle fill or single serving). The table
/// prices per gram; amounts are entered in milligrams. Formulas missing from
/// the table contribute nothing, mirroring the form behavior; validation
/// flags them separately.
fn ingredient_cost(rows: &[IngredientRow], table: &PriceTable) -> f64 {
    rows.iter()
        .map(|row| {
            let price_per_gram = table.price_per_gram(&row.formula).unwrap_or(0.0);
            price_per_gram * row.amount_mg() / MG_PER_GRAM
        })
        .sum()
}

fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Price a capsule configuration.
pub fn price_capsule(details: &CapsuleDetails, table: &PriceTable) -> CapsuleQuote {
    let total_weight_mg = total_weight_mg(&details.ingredients);
    let capsule_count = (total_weight_mg / CAPSULE_CAPACITY_MG).ceil() as u32;

    let ingredients_cost = ingredient_cost(&details.ingredients, table);
    let capsule_cost = f64::from(capsule_count) * CAPSULE_UNIT_COST;
    let bottle_cost = BOTTLE_COST.lookup(f64::from(capsule_count));

    let single_bottle_price = ingredients_cost + capsule_cost + bottle_cost;
    let quantity = details.quantity_or_default();

    CapsuleQuote {
        total_weight_mg,
        capsule_count,
        bottle_cost,
        capsule_cost,
        total_cost: round_currency(single_bottle_price * f64::from(quantity)),
    }
}

/// Price a powder configuration.
pub fn price_powder(details: &PowderDetails, table: &PriceTable) -> PowderQuote {
    let weight_per_serving_mg = total_weight_mg(&details.ingredients);
    let servings = details.servings_count();
    let container_weight_mg = weight_per_serving_mg * f64::from(servings);

    let max_servings = if weight_per_serving_mg > 0.0 {
        Some((CONTAINER_CAP_MG / weight_per_serving_mg).floor() as u64)
    } else {
        None
    };
    let over_limit = container_weight_mg > CONTAINER_CAP_MG;

    let ingredients_cost = ingredient_cost(&details.ingredients, table) * f64::from(servings);
    let packaging_cost = POWDER_PACKAGING.lookup(container_weight_mg / MG_PER_GRAM);
    let flavor_cost = flavor_surcharge(details.flavor_profile);

    let single_container_price = ingredients_cost + packaging_cost + flavor_cost;
    let quantity = details.quantity_or_default();

    PowderQuote {
        weight_per_serving_mg,
        container_weight_mg,
        max_servings,
        over_limit,
        packaging_cost,
        flavor_cost,
        total_cost: round_currency(single_container_price * f64::from(quantity)),
    }
}
