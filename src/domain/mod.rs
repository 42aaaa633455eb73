pub mod config;
pub mod error;
pub mod price_table;
pub mod pricing;
pub mod quote;
pub mod validation;

pub use config::{GatewayConfig, QuoteConfig};
pub use error::AppError;
pub use price_table::PriceTable;
pub use pricing::{CapsuleQuote, CostLadder, PowderQuote};
pub use quote::{
    CapsuleDetails, ContactDetails, Field, FlavorProfile, IngredientRow, PowderDetails,
    ProductType, QuoteFormState,
};
pub use validation::{FieldContext, ValidationState, validate_field, validate_rows};
