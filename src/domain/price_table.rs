//! Static ingredient price table shared read-only by the pricing engine.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// One entry in the price table source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PriceTableEntry {
    formula: String,
    price: f64,
}

/// Read-only mapping of formula name to price per gram.
///
/// Loaded once at startup, either from the embedded catalog or from an
/// operator-supplied JSON file with the same shape.
#[derive(Debug, Clone)]
pub struct PriceTable {
    prices: BTreeMap<String, f64>,
}

impl PriceTable {
    /// The catalog shipped with the binary.
    pub fn builtin() -> Self {
        let entries: Vec<PriceTableEntry> =
            serde_json::from_str(include_str!("../../assets/formulas.json"))
                .expect("Embedded price table must be valid JSON");
        Self::from_entries(entries)
    }

    /// Load a price table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        let entries: Vec<PriceTableEntry> = serde_json::from_str(&content)
            .map_err(|e| AppError::InvalidPriceTable(format!("{}: {}", path.display(), e)))?;

        if entries.is_empty() {
            return Err(AppError::InvalidPriceTable(format!(
                "{}: table contains no formulas",
                path.display()
            )));
        }
        for entry in &entries {
            if entry.price < 0.0 {
                return Err(AppError::InvalidPriceTable(format!(
                    "formula '{}' has a negative price",
                    entry.formula
                )));
            }
        }

        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: Vec<PriceTableEntry>) -> Self {
        let prices = entries.into_iter().map(|e| (e.formula, e.price)).collect();
        Self { prices }
    }

    /// Price per gram for a formula, if it is in the catalog.
    pub fn price_per_gram(&self, formula: &str) -> Option<f64> {
        self.prices.get(formula).copied()
    }

    /// Whether the catalog knows this formula.
    pub fn contains(&self, formula: &str) -> bool {
        self.prices.contains_key(formula)
    }

    /// Formula names in sorted order.
    pub fn formula_names(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }

    /// Number of formulas in the catalog.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
