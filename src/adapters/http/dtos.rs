use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::invoice::{CreateInvoiceCommand, CreateInvoiceLineItemDto};

/// One billed line in a create request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineItemRequest {
  #[validate(length(
    min = 1,
    max = 500,
    message = "Description must be between 1 and 500 characters"
  ))]
  pub description: String,

  /// Decimal quantity, checked by the domain
  pub quantity: Decimal,

  /// Unit label, defaults to "und"
  #[validate(length(min = 1, max = 32, message = "Unit must be between 1 and 32 characters"))]
  pub unit: Option<String>,

  /// Whole pesos
  #[validate(range(min = 0, message = "Unit price cannot be negative"))]
  pub unit_price: i64,
}

/// Request for issuing a new cuenta de cobro
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
  /// COMPANY or PERSON
  #[validate(length(min = 1, message = "Client type is required"))]
  pub client_type: String,

  #[validate(length(
    min = 1,
    max = 255,
    message = "Client name must be between 1 and 255 characters"
  ))]
  pub client_name: String,

  #[validate(length(min = 1, message = "At least one line item is required"), nested)]
  pub items: Vec<LineItemRequest>,

  pub issue_date: NaiveDate,

  /// CASH or CREDIT
  #[validate(length(min = 1, message = "Payment terms are required"))]
  pub payment_terms: String,

  #[validate(range(min = 0, max = 365, message = "Credit days must be between 0 and 365"))]
  pub credit_days: Option<i64>,

  /// Explicit due date; wins over credit days
  pub due_date: Option<NaiveDate>,
}

impl From<CreateInvoiceRequest> for CreateInvoiceCommand {
  fn from(request: CreateInvoiceRequest) -> Self {
    Self {
      client_type: request.client_type,
      client_name: request.client_name,
      items: request
        .items
        .into_iter()
        .map(|item| CreateInvoiceLineItemDto {
          description: item.description,
          quantity: item.quantity,
          unit: item.unit,
          unit_price: item.unit_price,
        })
        .collect(),
      issue_date: request.issue_date,
      payment_terms: request.payment_terms,
      credit_days: request.credit_days,
      due_date: request.due_date,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
}

/// Generic error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn valid_request() -> CreateInvoiceRequest {
    CreateInvoiceRequest {
      client_type: "COMPANY".to_string(),
      client_name: "EOBO CAFÉ".to_string(),
      items: vec![LineItemRequest {
        description: "Cafe 340 gr".to_string(),
        quantity: dec!(1),
        unit: None,
        unit_price: 170_000,
      }],
      issue_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
      payment_terms: "CREDIT".to_string(),
      credit_days: Some(20),
      due_date: None,
    }
  }

  #[test]
  fn test_create_invoice_request_validation() {
    assert!(valid_request().validate().is_ok());

    let mut no_items = valid_request();
    no_items.items.clear();
    assert!(no_items.validate().is_err());

    let mut empty_name = valid_request();
    empty_name.client_name = String::new();
    assert!(empty_name.validate().is_err());

    let mut long_credit = valid_request();
    long_credit.credit_days = Some(366);
    assert!(long_credit.validate().is_err());
  }

  #[test]
  fn test_nested_line_item_validation() {
    let mut request = valid_request();
    request.items[0].unit_price = -5;
    assert!(request.validate().is_err());

    let mut request = valid_request();
    request.items[0].unit = Some(String::new());
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_request_deserializes_without_optional_fields() {
    let json = r#"{
      "client_type": "PERSON",
      "client_name": "Laura Gómez",
      "items": [{"description": "Asesoría", "quantity": "2.5", "unit_price": 80000}],
      "issue_date": "2025-03-01",
      "payment_terms": "CASH"
    }"#;

    let request: CreateInvoiceRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.items[0].quantity, dec!(2.5));
    assert!(request.items[0].unit.is_none());
    assert!(request.credit_days.is_none());
    assert!(request.due_date.is_none());
  }
}
