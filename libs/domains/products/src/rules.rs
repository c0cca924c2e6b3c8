//! Declared validation rules for each product endpoint.
//!
//! Rules run in the order listed and every failure is reported, so a create
//! request with a blank name and a negative price gets both errors back.

use axum_helpers::{AppError, Check, Location, RequestInput, RequestRules, Rule};

use crate::models::{CreateProduct, UpdateProduct};

const ID: Rule = Rule::path("id", Check::IsInteger, "Invalid ID");
const NAME: Rule = Rule::body("name", Check::NonEmptyString, "Product name is required");
const PRICE_NUMERIC: Rule = Rule::body("price", Check::IsNumeric, "Price must be a number");
const PRICE_PRESENT: Rule = Rule::body("price", Check::IsPresent, "Price cannot be empty");
const PRICE_POSITIVE: Rule = Rule::body("price", Check::IsPositive, "Invalid price");
const AVAILABILITY: Rule = Rule::body(
    "availability",
    Check::IsBoolean,
    "Availability must be a boolean value",
);

/// `GET`, `PATCH` and `DELETE /{id}`
pub struct ProductIdRules;

impl RequestRules for ProductIdRules {
    const RULES: &'static [Rule] = &[ID];

    type Output = i32;

    fn extract(input: &RequestInput) -> Result<i32, AppError> {
        input.integer(Location::Path, "id")
    }
}

/// `POST /`
pub struct CreateProductRules;

impl RequestRules for CreateProductRules {
    const RULES: &'static [Rule] = &[NAME, PRICE_NUMERIC, PRICE_PRESENT, PRICE_POSITIVE];

    type Output = CreateProduct;

    fn extract(input: &RequestInput) -> Result<CreateProduct, AppError> {
        Ok(CreateProduct {
            name: input.string(Location::Body, "name")?,
            price: input.number(Location::Body, "price")?,
        })
    }
}

/// `PUT /{id}`; a full replacement, so availability is mandatory
pub struct UpdateProductRules;

impl RequestRules for UpdateProductRules {
    const RULES: &'static [Rule] = &[
        ID,
        NAME,
        PRICE_NUMERIC,
        PRICE_PRESENT,
        PRICE_POSITIVE,
        AVAILABILITY,
    ];

    type Output = (i32, UpdateProduct);

    fn extract(input: &RequestInput) -> Result<(i32, UpdateProduct), AppError> {
        let id = input.integer(Location::Path, "id")?;
        let update = UpdateProduct {
            name: input.string(Location::Body, "name")?,
            price: input.number(Location::Body, "price")?,
            availability: input.boolean(Location::Body, "availability")?,
        };
        Ok((id, update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::{FieldError, evaluate};
    use serde_json::json;
    use std::collections::HashMap;

    fn with_id(id: &str, body: serde_json::Value) -> RequestInput {
        RequestInput::new(HashMap::from([("id".to_string(), id.to_string())]), body)
    }

    #[test]
    fn test_patch_and_delete_never_read_the_body() {
        assert!(!ProductIdRules::reads_body());
        assert!(ProductIdRules::reads_path());
    }

    #[test]
    fn test_create_requires_name_and_price() {
        let errors = evaluate(CreateProductRules::RULES, &RequestInput::from_body(json!({})));
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "price", "price", "price"]);
    }

    #[test]
    fn test_create_extracts_coerced_values() {
        let input = RequestInput::from_body(json!({"name": "Mouse", "price": "25"}));
        assert!(evaluate(CreateProductRules::RULES, &input).is_empty());

        let product = CreateProductRules::extract(&input).unwrap();
        assert_eq!(
            product,
            CreateProduct {
                name: "Mouse".to_string(),
                price: 25.0
            }
        );
    }

    #[test]
    fn test_update_reports_id_first_then_body_fields() {
        let input = with_id("x1", json!({"name": "", "price": 0, "availability": "maybe"}));
        let errors = evaluate(UpdateProductRules::RULES, &input);

        assert_eq!(
            errors,
            vec![
                FieldError::new("id", "Invalid ID"),
                FieldError::new("name", "Product name is required"),
                FieldError::new("price", "Invalid price"),
                FieldError::new("availability", "Availability must be a boolean value"),
            ]
        );
    }

    #[test]
    fn test_update_without_availability_is_rejected() {
        let input = with_id("4", json!({"name": "Mouse", "price": 30}));
        let errors = evaluate(UpdateProductRules::RULES, &input);
        assert_eq!(
            errors,
            vec![FieldError::new("availability", "Availability must be a boolean value")]
        );
    }

    #[test]
    fn test_update_extracts_id_and_payload() {
        let input = with_id("4", json!({"name": "Mouse", "price": 30, "availability": false}));
        let (id, update) = UpdateProductRules::extract(&input).unwrap();
        assert_eq!(id, 4);
        assert!(!update.availability);
        assert_eq!(update.price, 30.0);
    }
}
