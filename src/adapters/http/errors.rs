use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::invoice::InvoiceError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Unknown invoice or document (404 Not Found)
  NotFound(String),

  /// A store could not be reached (503 Service Unavailable)
  ///
  /// `invoice_number` is set when a number was already issued.
  ServiceUnavailable {
    message: String,
    invoice_number: Option<u64>,
  },

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::ServiceUnavailable { message, .. } => {
        write!(f, "Service unavailable: {}", message)
      }
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message, details) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone(), None),
      ApiError::NotFound(msg) => ("not_found", msg.clone(), None),
      ApiError::ServiceUnavailable {
        message,
        invoice_number,
      } => {
        tracing::warn!("Store unavailable: {}", message);
        (
          "service_unavailable",
          "A storage backend is unavailable. Please try again later".to_string(),
          invoice_number.map(|n| serde_json::json!({ "invoice_number": n })),
        )
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
          None,
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert InvoiceError to ApiError
impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    let invoice_number = error.issued_number();
    match error {
      InvoiceError::Validation(err) => ApiError::Validation(err.to_string()),
      InvoiceError::InvoiceNotFound(id) => ApiError::NotFound(format!("Invoice {} not found", id)),
      InvoiceError::DocumentNotFound(number) => {
        ApiError::NotFound(format!("Document for invoice {} not found", number))
      }
      err @ InvoiceError::StoreUnavailable { .. } => ApiError::ServiceUnavailable {
        message: err.to_string(),
        invoice_number,
      },
      InvoiceError::RenderFailed(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    // Nested line item errors do not show up in field_errors
    if messages.is_empty() {
      return ApiError::Validation(errors.to_string());
    }

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{StoreError, StorePhase, ValidationError};
  use actix_web::body::to_bytes;
  use uuid::Uuid;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("test".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::ServiceUnavailable {
        message: "test".to_string(),
        invoice_number: None,
      }
      .status_code(),
      StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_invoice_error_conversion() {
    let api_error: ApiError = InvoiceError::Validation(ValidationError::NoLineItems).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = InvoiceError::InvoiceNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = InvoiceError::store(
      StorePhase::Allocation,
      StoreError::ConnectionFailed("refused".to_string()),
    )
    .into();
    assert!(matches!(
      api_error,
      ApiError::ServiceUnavailable {
        invoice_number: None,
        ..
      }
    ));
  }

  #[actix_web::test]
  async fn test_persistence_failure_reports_issued_number() {
    let api_error: ApiError = InvoiceError::store(
      StorePhase::Persistence { invoice_number: 42 },
      StoreError::Timeout("blob put".to_string()),
    )
    .into();

    let response = api_error.error_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "service_unavailable");
    assert_eq!(json["details"]["invoice_number"], 42);
  }
}
