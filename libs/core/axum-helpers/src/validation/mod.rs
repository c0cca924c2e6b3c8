//! Declarative request validation.
//!
//! An endpoint declares an ordered list of [`Rule`]s, each binding one field in the
//! path or JSON body to a [`Check`] and a literal message. [`evaluate`] runs every
//! rule and collects a [`FieldError`] for each failure, in declaration order. It
//! never stops at the first failure, so a single response can report a missing
//! name together with a bad price.
//!
//! ```ignore
//! use axum_helpers::validation::{Check, Rule, evaluate};
//!
//! const RULES: &[Rule] = &[
//!     Rule::body("name", Check::NonEmptyString, "Product name is required"),
//!     Rule::body("price", Check::IsPositive, "Invalid price"),
//! ];
//!
//! let errors = evaluate(RULES, &input);
//! ```

pub mod coerce;

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Where a rule looks up its field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Path,
    Body,
}

/// Predicate applied to a single field.
///
/// A missing field fails every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    IsInteger,
    NonEmptyString,
    IsPresent,
    IsNumeric,
    IsPositive,
    IsBoolean,
}

impl Check {
    pub fn passes(self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };

        match self {
            Check::IsInteger => coerce::as_integer(value).is_some(),
            Check::NonEmptyString => coerce::as_non_empty_str(value).is_some(),
            Check::IsPresent => coerce::is_present(value),
            Check::IsNumeric => coerce::as_number(value).is_some(),
            Check::IsPositive => coerce::as_number(value).is_some_and(|n| n > 0.0),
            Check::IsBoolean => coerce::as_bool(value).is_some(),
        }
    }
}

/// One declared validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub location: Location,
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn path(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            location: Location::Path,
            field,
            check,
            message,
        }
    }

    pub const fn body(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            location: Location::Body,
            field,
            check,
            message,
        }
    }
}

/// A rule violation as reported to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "price")]
    pub field: String,
    #[schema(example = "Invalid price")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The parts of a request that rules can inspect
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub path: HashMap<String, String>,
    /// Parsed JSON body; anything other than an object exposes no fields.
    pub body: Value,
}

impl RequestInput {
    pub fn new(path: HashMap<String, String>, body: Value) -> Self {
        Self { path, body }
    }

    pub fn from_path(path: HashMap<String, String>) -> Self {
        Self {
            path,
            body: Value::Object(Map::new()),
        }
    }

    pub fn from_body(body: Value) -> Self {
        Self {
            path: HashMap::new(),
            body,
        }
    }

    /// Raw value of `field`, with path segments surfaced as JSON strings.
    pub fn lookup(&self, location: Location, field: &str) -> Option<Value> {
        match location {
            Location::Path => self.path.get(field).cloned().map(Value::String),
            Location::Body => self.body.get(field).cloned(),
        }
    }

    pub fn integer(&self, location: Location, field: &str) -> Result<i32, AppError> {
        self.lookup(location, field)
            .as_ref()
            .and_then(coerce::as_integer)
            .ok_or_else(|| malformed(field))
    }

    pub fn number(&self, location: Location, field: &str) -> Result<f64, AppError> {
        self.lookup(location, field)
            .as_ref()
            .and_then(coerce::as_number)
            .ok_or_else(|| malformed(field))
    }

    pub fn boolean(&self, location: Location, field: &str) -> Result<bool, AppError> {
        self.lookup(location, field)
            .as_ref()
            .and_then(coerce::as_bool)
            .ok_or_else(|| malformed(field))
    }

    /// Non-blank string, returned as sent (no trimming).
    pub fn string(&self, location: Location, field: &str) -> Result<String, AppError> {
        self.lookup(location, field)
            .as_ref()
            .and_then(coerce::as_non_empty_str)
            .map(str::to_owned)
            .ok_or_else(|| malformed(field))
    }
}

fn malformed(field: &str) -> AppError {
    AppError::BadRequest(format!("Field '{field}' is missing or malformed"))
}

/// Run every rule against `input`; an empty result means the request is valid.
pub fn evaluate(rules: &[Rule], input: &RequestInput) -> Vec<FieldError> {
    rules
        .iter()
        .filter(|rule| {
            !rule
                .check
                .passes(input.lookup(rule.location, rule.field).as_ref())
        })
        .map(|rule| FieldError::new(rule.field, rule.message))
        .collect()
}

/// A named set of rules for one endpoint, plus how to build its typed payload.
///
/// `extract` is only called once [`Self::RULES`] reported no errors.
pub trait RequestRules {
    const RULES: &'static [Rule];

    type Output;

    fn extract(input: &RequestInput) -> Result<Self::Output, AppError>;

    fn reads_path() -> bool {
        Self::RULES.iter().any(|r| r.location == Location::Path)
    }

    fn reads_body() -> bool {
        Self::RULES.iter().any(|r| r.location == Location::Body)
    }
}

/// Flatten `validator` derive errors into field errors, sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
