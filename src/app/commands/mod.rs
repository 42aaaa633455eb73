pub mod formulas;
pub mod price;
pub mod submit;
pub mod validate;
