pub mod field;
pub mod formula;
pub mod state;

pub use field::{FieldContext, validate_field};
pub use formula::validate_rows;
pub use state::ValidationState;
