//! `labquote formulas`: list the active ingredient catalog.

use crate::domain::{AppError, QuoteConfig};

pub fn execute(config: &QuoteConfig) -> Result<Vec<String>, AppError> {
    let table = config.price_table()?;

    let mut names = Vec::with_capacity(table.len());
    for name in table.formula_names() {
        let price = table.price_per_gram(name).unwrap_or(0.0);
        println!("{:<24} ${:.2}/g", name, price);
        names.push(name.to_string());
    }

    Ok(names)
}
