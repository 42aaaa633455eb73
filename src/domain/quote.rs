//! Quote form document: contact details plus per-product-type detail blocks.
//!
//! Numeric entry fields keep the raw user-entered text. Pricing treats
//! unparseable input as zero; the validators independently reject it before
//! submission. Derived totals are never edited directly, only refreshed via
//! [`QuoteFormState::recompute_derived`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::pricing;
use crate::domain::price_table::PriceTable;

/// Product type selected for the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Powder,
    Capsule,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Powder => "powder",
            ProductType::Capsule => "capsule",
        }
    }

    pub fn parse(value: &str) -> Option<ProductType> {
        match value {
            "powder" => Some(ProductType::Powder),
            "capsule" => Some(ProductType::Capsule),
            _ => None,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flavor profile for powder products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlavorProfile {
    Natural,
    Artificial,
}

impl FlavorProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlavorProfile::Natural => "natural",
            FlavorProfile::Artificial => "artificial",
        }
    }

    pub fn parse(value: &str) -> Option<FlavorProfile> {
        match value {
            "natural" => Some(FlavorProfile::Natural),
            "artificial" => Some(FlavorProfile::Artificial),
            _ => None,
        }
    }
}

/// One ingredient line in a formula: a catalog formula name and a raw
/// milligram amount as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientRow {
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub amount: String,
}

impl IngredientRow {
    pub fn new(formula: impl Into<String>, amount: impl Into<String>) -> Self {
        Self { formula: formula.into(), amount: amount.into() }
    }

    /// Entered amount in milligrams; empty or unparseable input counts as 0.
    pub fn amount_mg(&self) -> f64 {
        self.amount.trim().parse::<f64>().unwrap_or(0.0)
    }
}

/// Powder product configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowderDetails {
    #[serde(default)]
    pub flavor_profile: Option<FlavorProfile>,
    /// Servings per container, as entered.
    #[serde(default)]
    pub servings: String,
    /// Number of containers, as entered.
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientRow>,
    /// Derived: container weight in milligrams.
    #[serde(default)]
    pub total_ingredient_weight: f64,
    /// Derived: total price for all containers.
    #[serde(default)]
    pub total_cost: f64,
}

impl PowderDetails {
    /// Parsed servings count; invalid input counts as 0 for weight math.
    pub fn servings_count(&self) -> u32 {
        self.servings.trim().parse().unwrap_or(0)
    }

    /// Parsed container count, defaulting to 1 when unset or invalid.
    pub fn quantity_or_default(&self) -> u32 {
        match self.quantity.trim().parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => 1,
        }
    }
}

/// Capsule product configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapsuleDetails {
    /// Number of bottles, as entered.
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientRow>,
    /// Derived: per-bottle fill weight in milligrams.
    #[serde(default)]
    pub total_ingredient_weight: f64,
    /// Derived: capsules needed for one bottle.
    #[serde(default)]
    pub total_capsules: u32,
    /// Derived: total price for all bottles.
    #[serde(default)]
    pub total_cost: f64,
}

impl CapsuleDetails {
    /// Parsed bottle count, defaulting to 1 when unset or invalid.
    pub fn quantity_or_default(&self) -> u32 {
        match self.quantity.trim().parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => 1,
        }
    }
}

/// Prospect contact and company information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub confirm_email: String,
    #[serde(default)]
    pub company_name: String,
    /// Optional; validated as a URL only when non-empty.
    #[serde(default)]
    pub company_website: String,
    /// "yes" or "no".
    #[serde(default)]
    pub has_existing_product: String,
    /// Required when `has_existing_product` is "yes".
    #[serde(default)]
    pub existing_product_link: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

/// The aggregate quote document.
///
/// Both product blocks are always present; only the one matching
/// `product_type` is validated and priced, the other is inert. Every edit
/// produces a new state value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFormState {
    #[serde(default)]
    pub contact: ContactDetails,
    #[serde(default)]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub powder: PowderDetails,
    #[serde(default)]
    pub capsule: CapsuleDetails,
}

/// Named fields of the quote document, as exposed to the validators and the
/// error map. Names match the wire payload keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    ConfirmEmail,
    CompanyName,
    CompanyWebsite,
    City,
    State,
    ZipCode,
    HasExistingProduct,
    ExistingProductLink,
    ProductType,
    FlavorProfile,
    Servings,
    Quantity,
    Ingredients,
    CaptchaToken,
}

impl Field {
    /// Contact-section fields, validated for every submission.
    pub const CONTACT: [Field; 11] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::ConfirmEmail,
        Field::CompanyName,
        Field::CompanyWebsite,
        Field::City,
        Field::State,
        Field::ZipCode,
        Field::HasExistingProduct,
        Field::ExistingProductLink,
    ];

    /// Fields of the product block active for the given type.
    pub fn product_fields(product_type: ProductType) -> &'static [Field] {
        match product_type {
            ProductType::Powder => {
                &[Field::FlavorProfile, Field::Servings, Field::Quantity, Field::Ingredients]
            }
            ProductType::Capsule => &[Field::Quantity, Field::Ingredients],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::ConfirmEmail => "confirmEmail",
            Field::CompanyName => "companyName",
            Field::CompanyWebsite => "companyWebsite",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zipCode",
            Field::HasExistingProduct => "hasExistingProduct",
            Field::ExistingProductLink => "existingProductLink",
            Field::ProductType => "productType",
            Field::FlavorProfile => "flavorProfile",
            Field::Servings => "servings",
            Field::Quantity => "quantity",
            Field::Ingredients => "ingredients",
            Field::CaptchaToken => "captchaToken",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl QuoteFormState {
    /// Apply one field edit, returning the updated document.
    ///
    /// `Ingredients` and `CaptchaToken` are not plain text fields and pass
    /// through unchanged; rows are edited with the ingredient operations
    /// below.
    pub fn with_field(mut self, field: Field, value: &str) -> Self {
        match field {
            Field::FirstName => self.contact.first_name = value.to_string(),
            Field::LastName => self.contact.last_name = value.to_string(),
            Field::Email => self.contact.email = value.to_string(),
            Field::ConfirmEmail => self.contact.confirm_email = value.to_string(),
            Field::CompanyName => self.contact.company_name = value.to_string(),
            Field::CompanyWebsite => self.contact.company_website = value.to_string(),
            Field::City => self.contact.city = value.to_string(),
            Field::State => self.contact.state = value.to_string(),
            Field::ZipCode => self.contact.zip_code = value.to_string(),
            Field::HasExistingProduct => {
                self.contact.has_existing_product = value.to_string();
                // Answering "no" discards a previously entered link.
                if value == "no" {
                    self.contact.existing_product_link.clear();
                }
            }
            Field::ExistingProductLink => self.contact.existing_product_link = value.to_string(),
            Field::ProductType => self.product_type = ProductType::parse(value),
            Field::FlavorProfile => self.powder.flavor_profile = FlavorProfile::parse(value),
            Field::Servings => self.powder.servings = value.to_string(),
            Field::Quantity => match self.product_type {
                Some(ProductType::Powder) => self.powder.quantity = value.to_string(),
                Some(ProductType::Capsule) => self.capsule.quantity = value.to_string(),
                None => {}
            },
            Field::Ingredients | Field::CaptchaToken => {}
        }
        self
    }

    /// Current raw value of a field, as the validators see it.
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.contact.first_name,
            Field::LastName => &self.contact.last_name,
            Field::Email => &self.contact.email,
            Field::ConfirmEmail => &self.contact.confirm_email,
            Field::CompanyName => &self.contact.company_name,
            Field::CompanyWebsite => &self.contact.company_website,
            Field::City => &self.contact.city,
            Field::State => &self.contact.state,
            Field::ZipCode => &self.contact.zip_code,
            Field::HasExistingProduct => &self.contact.has_existing_product,
            Field::ExistingProductLink => &self.contact.existing_product_link,
            Field::ProductType => self.product_type.map(|t| t.as_str()).unwrap_or(""),
            Field::FlavorProfile => self.powder.flavor_profile.map(|f| f.as_str()).unwrap_or(""),
            Field::Servings => &self.powder.servings,
            Field::Quantity => match self.product_type {
                Some(ProductType::Capsule) => &self.capsule.quantity,
                _ => &self.powder.quantity,
            },
            Field::Ingredients | Field::CaptchaToken => "",
        }
    }

    /// Ingredient rows of the active product block.
    pub fn active_ingredients(&self) -> &[IngredientRow] {
        match self.product_type {
            Some(ProductType::Capsule) => &self.capsule.ingredients,
            _ => &self.powder.ingredients,
        }
    }

    fn active_ingredients_mut(&mut self) -> &mut Vec<IngredientRow> {
        match self.product_type {
            Some(ProductType::Capsule) => &mut self.capsule.ingredients,
            _ => &mut self.powder.ingredients,
        }
    }

    /// Append an empty ingredient row to the active block.
    pub fn with_ingredient_added(mut self) -> Self {
        self.active_ingredients_mut().push(IngredientRow::default());
        self
    }

    /// Remove a row from the active block. Out-of-range indexes are ignored.
    pub fn with_ingredient_removed(mut self, index: usize) -> Self {
        let rows = self.active_ingredients_mut();
        if index < rows.len() {
            rows.remove(index);
        }
        self
    }

    /// Update one row of the active block in place.
    pub fn with_ingredient(
        mut self,
        index: usize,
        formula: Option<&str>,
        amount: Option<&str>,
    ) -> Self {
        let rows = self.active_ingredients_mut();
        if let Some(row) = rows.get_mut(index) {
            if let Some(formula) = formula {
                row.formula = formula.to_string();
            }
            if let Some(amount) = amount {
                row.amount = amount.to_string();
            }
        }
        self
    }

    /// Refresh the derived totals of both product blocks from their inputs.
    ///
    /// Called after every mutating operation; pricing itself is stateless, so
    /// repeated calls with the same inputs are no-ops.
    pub fn recompute_derived(mut self, table: &PriceTable) -> Self {
        let powder_quote = pricing::price_powder(&self.powder, table);
        self.powder.total_ingredient_weight = powder_quote.container_weight_mg;
        self.powder.total_cost = powder_quote.total_cost;

        let capsule_quote = pricing::price_capsule(&self.capsule, table);
        self.capsule.total_ingredient_weight = capsule_quote.total_weight_mg;
        self.capsule.total_capsules = capsule_quote.capsule_count;
        self.capsule.total_cost = capsule_quote.total_cost;

        self
    }
}
