//! Field-level validity and "touched" bookkeeping.
//!
//! Recomputed reactively from the form state and never persisted. A field's
//! error is only shown once the field has been touched; submission ignores
//! the touched set and checks every active field.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::quote::Field;

#[derive(Debug, Clone, Default)]
pub struct ValidationState {
    errors: BTreeMap<Field, String>,
    touched: BTreeSet<Field>,
}

impl ValidationState {
    /// Record the validation result for one field.
    pub fn set(&mut self, field: Field, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn touch_all(&mut self, fields: impl IntoIterator<Item = Field>) {
        self.touched.extend(fields);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Error for a field, gated on the field having been touched.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.is_touched(field) { self.error(field) } else { None }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// All current errors in field order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
        self.touched.clear();
    }
}
