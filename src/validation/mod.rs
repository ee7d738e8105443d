//! Request body validation.
//!
//! Each input type implements [`Schema`], turning a raw JSON value into a
//! typed, normalized value or a list of field failures. [`Validated`] runs a
//! schema as an axum extractor so handlers only ever see checked input.

pub mod schemas;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;

pub use schemas::*;

/// A single failed check on one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn first_message(&self) -> &str {
        self.0
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or("Invalid request body")
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors.first_message().to_string();
        ApiError::validation_error(message, Some(errors.0))
    }
}

/// Parses a raw JSON body into a checked input type
pub trait Schema: Sized {
    fn parse(value: &Value) -> Result<Self, ValidationErrors>;
}

/// Collects field failures while reading values out of a JSON object.
///
/// Every accessor records its own failure and returns `None`, so a schema can
/// read all of its fields and report every problem at once.
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    pub fn new(value: &'a Value) -> Result<Self, ValidationErrors> {
        match value {
            Value::Object(object) => Ok(Self {
                object,
                errors: ValidationErrors::default(),
            }),
            _ => Err(ValidationErrors::single(
                "body",
                "Request body must be a JSON object",
            )),
        }
    }

    /// Required string, trimmed, with at least `min_len` characters
    pub fn string(&mut self, field: &str, min_len: usize) -> Option<String> {
        match self.object.get(field) {
            None | Some(Value::Null) => {
                self.errors.push(field, format!("{} is required", label(field)));
                None
            }
            Some(value) => self.check_string(field, value, min_len),
        }
    }

    /// Optional string; absent and null both read as `None`
    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        self.nullable_string(field).flatten()
    }

    /// Distinguishes an absent field (`None`) from an explicit null (`Some(None)`).
    /// A blank string counts as null.
    pub fn nullable_string(&mut self, field: &str) -> Option<Option<String>> {
        match self.object.get(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => self
                .check_string(field, value, 0)
                .map(|text| Some(text).filter(|text| !text.is_empty())),
        }
    }

    /// Required email, trimmed and lowercased
    pub fn email(&mut self, field: &str) -> Option<String> {
        let email = self.string(field, 1)?.to_lowercase();
        match validate_email_format(&email) {
            Ok(()) => Some(email),
            Err(msg) => {
                self.errors.push(field, msg);
                None
            }
        }
    }

    /// Required password; surrounding whitespace is preserved
    pub fn password(&mut self, field: &str, min_len: usize) -> Option<String> {
        match self.object.get(field) {
            Some(Value::String(s)) if s.chars().count() >= min_len => Some(s.clone()),
            Some(Value::String(_)) => {
                self.errors.push(
                    field,
                    format!("{} must be at least {} characters", label(field), min_len),
                );
                None
            }
            None | Some(Value::Null) => {
                self.errors.push(field, format!("{} is required", label(field)));
                None
            }
            Some(_) => {
                self.errors.push(field, format!("{} must be a string", label(field)));
                None
            }
        }
    }

    pub fn uuid(&mut self, field: &str) -> Option<Uuid> {
        let raw = self.string(field, 1)?;
        match Uuid::parse_str(&raw) {
            Ok(id) => Some(id),
            Err(_) => {
                self.errors.push(field, format!("{} must be a valid id", label(field)));
                None
            }
        }
    }

    /// Required number no smaller than `min`
    pub fn number(&mut self, field: &str, min: f64) -> Option<f64> {
        match self.object.get(field) {
            None | Some(Value::Null) => {
                self.errors.push(field, format!("{} is required", label(field)));
                None
            }
            Some(value) => self.check_number(field, value, min),
        }
    }

    pub fn optional_number(&mut self, field: &str, min: f64) -> Option<f64> {
        match self.object.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.check_number(field, value, min),
        }
    }

    /// Required whole number no smaller than `min`
    pub fn integer(&mut self, field: &str, min: i32) -> Option<i32> {
        match self.object.get(field) {
            None | Some(Value::Null) => {
                self.errors.push(field, format!("{} is required", label(field)));
                None
            }
            Some(value) => self.check_integer(field, value, min),
        }
    }

    pub fn optional_integer(&mut self, field: &str, min: i32) -> Option<i32> {
        match self.object.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.check_integer(field, value, min),
        }
    }

    /// Succeeds with `build()` only when no field failed
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or_else(|| ValidationErrors::single("body", "Invalid request body"))
    }

    fn check_string(&mut self, field: &str, value: &Value, min_len: usize) -> Option<String> {
        let Some(s) = value.as_str() else {
            self.errors.push(field, format!("{} must be a string", label(field)));
            return None;
        };
        let trimmed = s.trim();
        if trimmed.chars().count() < min_len {
            let message = if min_len <= 1 {
                format!("{} is required", label(field))
            } else {
                format!("{} must be at least {} characters", label(field), min_len)
            };
            self.errors.push(field, message);
            return None;
        }
        Some(trimmed.to_string())
    }

    fn check_number(&mut self, field: &str, value: &Value, min: f64) -> Option<f64> {
        let Some(n) = value.as_f64() else {
            self.errors.push(field, format!("{} must be a number", label(field)));
            return None;
        };
        if n < min {
            let message = if min == 0.0 {
                format!("{} cannot be negative", label(field))
            } else {
                format!("{} must be at least {}", label(field), min)
            };
            self.errors.push(field, message);
            return None;
        }
        Some(n)
    }

    fn check_integer(&mut self, field: &str, value: &Value, min: i32) -> Option<i32> {
        let parsed = value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        });
        let Some(n) = parsed else {
            let message = if value.is_number() {
                format!("{} must be a whole number", label(field))
            } else {
                format!("{} must be a number", label(field))
            };
            self.errors.push(field, message);
            return None;
        };
        if n < i64::from(min) {
            self.errors.push(field, format!("{} must be at least {}", label(field), min));
            return None;
        }
        match i32::try_from(n) {
            Ok(n) => Some(n),
            Err(_) => {
                self.errors.push(field, format!("{} is too large", label(field)));
                None
            }
        }
    }
}

/// Field name as it reads at the start of a message: `exercise_id` -> `Exercise id`
fn label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// Basic email shape check: one `@`, non-empty local part, dotted domain
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Email must be a valid email address".to_string());
    }

    let domain = parts[1];
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Email must be a valid email address".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Email must be a valid email address".to_string());
    }

    Ok(())
}

/// JSON body extractor that runs a [`Schema`] before the handler sees it
#[derive(Debug)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large("Request body too large"),
                _ => ApiError::validation_error(rejection.body_text(), None),
            })?;

        Ok(Validated(T::parse(&value)?))
    }
}
