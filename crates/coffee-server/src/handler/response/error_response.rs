use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// JSON error body shared by handler and authorization failures.
///
/// Serializes as `{"success": false, "error": <status>, "code": ..., "message": ...}`,
/// plus the related `resource` when one is set. The context is kept for
/// logging and never sent to the client.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone)]
pub struct ErrorResponse<'a> {
    /// Machine-readable error code.
    pub code: Cow<'a, str>,
    /// User-friendly error message safe for client display.
    pub message: Cow<'a, str>,
    /// The resource that the error relates to (optional, set by handler).
    pub resource: Option<Cow<'a, str>>,
    /// Internal context for debugging, not exposed to the client.
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code, serialized as the `error` field.
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "bad request",
        StatusCode::BAD_REQUEST,
    );
    pub const METHOD_NOT_ALLOWED: Self = Self::new(
        "method_not_allowed",
        "method not allowed",
        StatusCode::METHOD_NOT_ALLOWED,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "resource not found",
        StatusCode::NOT_FOUND,
    );
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "request body too large",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const UNPROCESSABLE: Self = Self::new(
        "unprocessable",
        "unprocessable",
        StatusCode::UNPROCESSABLE_ENTITY,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "internal server error",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response from static parts.
    #[inline]
    pub const fn new(code: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Creates a new error response with an owned or borrowed message.
    pub fn custom(
        code: impl Into<Cow<'a, str>>,
        message: impl Into<Cow<'a, str>>,
        status: StatusCode,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            resource: None,
            context: None,
            status,
        }
    }

    /// Sets the related resource.
    /// If a resource already exists, it merges them with a separator.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Appends the new message to the existing message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        let new_message = message.into();
        self.message = Cow::Owned(format!("{}: {}", self.message, new_message));
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl Serialize for ErrorResponse<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.resource.is_some() { 5 } else { 4 };
        let mut state = serializer.serialize_struct("ErrorResponse", len)?;
        state.serialize_field("success", &false)?;
        state.serialize_field("error", &self.status.as_u16())?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        if let Some(resource) = &self.resource {
            state.serialize_field("resource", resource)?;
        }
        state.end()
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_response_merging_resource() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("drinks")
            .with_resource("7");

        assert_eq!(response.resource.as_deref(), Some("drinks/7"));
    }

    #[test]
    fn error_response_merging_message() {
        let response = ErrorResponse::UNPROCESSABLE
            .with_message("title is required")
            .with_message("recipe is required");

        assert_eq!(
            &response.message,
            "unprocessable: title is required: recipe is required"
        );
    }

    #[test]
    fn error_response_merging_context() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("store lock poisoned")
            .with_context("retry skipped");

        assert_eq!(
            response.context.as_deref(),
            Some("store lock poisoned; retry skipped")
        );
    }

    #[test]
    fn error_response_serialization() {
        let response = ErrorResponse::NOT_FOUND.with_context("drink 7");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "success": false,
                "error": 404,
                "code": "not_found",
                "message": "resource not found",
            })
        );
    }

    #[test]
    fn error_response_serializes_resource() {
        let response = ErrorResponse::custom(
            "invalid_header",
            String::from("Token not found."),
            StatusCode::UNAUTHORIZED,
        )
        .with_resource("drinks");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["error"], 401);
        assert_eq!(value["code"], "invalid_header");
        assert_eq!(value["message"], "Token not found.");
        assert_eq!(value["resource"], "drinks");
    }
}
