//! Validated JSON extractor with automatic validation.
//!
//! This module provides [`ValidateJson`], an enhanced JSON extractor that
//! combines deserialization with automatic validation using the `validator` crate.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::Json;
use crate::handler::{Error, ErrorKind};
use crate::utility::tracing_targets;

/// JSON extractor that validates the payload with the `validator` crate.
///
/// Validation failures are rejected with `422`, listing every failing field
/// in the message.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;

        data.validate()?;
        Ok(Self(data))
    }
}

/// Formats length validation errors.
fn format_length_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    let number = |key: &str| params.get(key).and_then(serde_json::Value::as_u64);

    match (number("min"), number("max")) {
        (Some(min), Some(max)) => format!("'{field}' must be between {min} and {max} long"),
        (Some(min), None) => format!("'{field}' must be at least {min} long"),
        (None, Some(max)) => format!("'{field}' must be at most {max} long"),
        _ => format!("'{field}' has invalid length"),
    }
}

/// Formats range validation errors.
fn format_range_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    let number = |key: &str| params.get(key).and_then(serde_json::Value::as_f64);

    match (number("min"), number("max")) {
        (Some(min), Some(max)) => format!("'{field}' must be between {min} and {max}"),
        (Some(min), None) => format!("'{field}' must be at least {min}"),
        (None, Some(max)) => format!("'{field}' must be at most {max}"),
        _ => format!("'{field}' is out of valid range"),
    }
}

fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("'{field}' {custom_message}");
    }

    match error.code.as_ref() {
        "required" => format!("'{field}' is required"),
        "length" => format_length_error(field, &error.params),
        "range" => format_range_error(field, &error.params),
        code => format!("'{field}' failed validation: {code}"),
    }
}

/// Flattens nested struct and list errors into `path.to[0].field` messages.
fn collect_messages(prefix: &str, errors: &ValidationErrors, messages: &mut Vec<String>) {
    let mut fields = errors.errors().iter().collect::<Vec<_>>();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => messages.extend(
                field_errors
                    .iter()
                    .map(|error| format_validation_error(&path, error)),
            ),
            ValidationErrorsKind::Struct(nested) => collect_messages(&path, nested, messages),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(&format!("{path}[{index}]"), nested, messages);
                }
            }
        }
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_messages("", &errors, &mut messages);

        let user_message = match messages.as_slice() {
            [] => "validation failed".to_string(),
            [single_error] => single_error.clone(),
            multiple => multiple.join(", "),
        };

        tracing::debug!(
            target: tracing_targets::HANDLER_DRINKS,
            errors = %user_message,
            "request validation failed"
        );

        ErrorKind::Unprocessable.with_message(user_message)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate)]
    struct Part {
        #[validate(range(min = 1))]
        parts: i32,
    }

    #[derive(Debug, Validate)]
    struct Payload {
        #[validate(length(min = 1, max = 5))]
        title: String,
        #[validate(nested)]
        recipe: Vec<Part>,
    }

    #[test]
    fn validation_errors_are_unprocessable() {
        let payload = Payload {
            title: String::new(),
            recipe: vec![Part { parts: 1 }, Part { parts: 0 }],
        };
        let error = Error::from(payload.validate().unwrap_err());

        assert_eq!(error.kind(), ErrorKind::Unprocessable);
        let message = error.message().unwrap();
        assert!(message.contains("'title' must be between 1 and 5 long"), "{message}");
        assert!(message.contains("recipe[1].parts"), "{message}");
    }
}
