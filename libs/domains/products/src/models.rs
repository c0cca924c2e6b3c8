use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank_name")
            .with_message(Cow::Borrowed("Product name is required")));
    }
    Ok(())
}

/// A product in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned by the store on insert
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Mouse")]
    pub name: String,
    /// Always strictly positive
    #[schema(example = 25.0)]
    pub price: f64,
    /// Defaults to `true` on creation
    pub availability: bool,
}

impl Product {
    /// Full replacement of the mutable fields; `id` never changes.
    pub fn apply_update(&mut self, input: UpdateProduct) {
        self.name = input.name;
        self.price = input.price;
        self.availability = input.availability;
    }

    /// The update that flips availability and keeps everything else.
    pub fn toggled(&self) -> UpdateProduct {
        UpdateProduct {
            name: self.name.clone(),
            price: self.price,
            availability: !self.availability,
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(function = "validate_product_name"))]
    #[schema(example = "Monitor")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Invalid price"))]
    #[schema(example = 300.0)]
    pub price: f64,
}

/// DTO for replacing a product; every field is required
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(custom(function = "validate_product_name"))]
    #[schema(example = "Mouse")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Invalid price"))]
    #[schema(example = 30.0)]
    pub price: f64,
    pub availability: bool,
}
