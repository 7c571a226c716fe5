use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{
  ClientName, ClientType, CreditDays, InvoiceDraft, InvoiceError, InvoiceLineItem,
  InvoicePipeline, LineItemDescription, PaymentTerms, Quantity, UnitLabel, ValidationError,
};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceLineItemDto {
  pub description: String,
  pub quantity: Decimal,
  pub unit: Option<String>,
  pub unit_price: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub client_type: String,
  pub client_name: String,
  pub items: Vec<CreateInvoiceLineItemDto>,
  pub issue_date: NaiveDate,
  pub payment_terms: String,
  pub credit_days: Option<i64>,
  pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
  pub invoice_id: Uuid,
  pub invoice_number: u64,
  pub total_amount: u64,
  pub total_amount_text: String,
  pub due_date: Option<NaiveDate>,
  pub blob_id: String,
  pub created_at: DateTime<Utc>,
}

pub struct CreateInvoiceUseCase {
  pipeline: Arc<InvoicePipeline>,
}

impl CreateInvoiceUseCase {
  pub fn new(pipeline: Arc<InvoicePipeline>) -> Self {
    Self { pipeline }
  }

  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<CreateInvoiceResponse, InvoiceError> {
    let draft = Self::to_draft(command)?;
    let record = self.pipeline.issue(&draft).await?;

    Ok(CreateInvoiceResponse {
      invoice_id: record.id,
      invoice_number: record.invoice_number.value(),
      total_amount: record.total_amount,
      total_amount_text: record.total_amount_text,
      due_date: record.due_date,
      blob_id: record.blob_id.value().to_string(),
      created_at: record.created_at,
    })
  }

  fn to_draft(command: CreateInvoiceCommand) -> Result<InvoiceDraft, ValidationError> {
    let client_type = ClientType::from_str(&command.client_type)?;
    let client_name = ClientName::new(command.client_name)?;
    let payment_terms = PaymentTerms::from_str(&command.payment_terms)?;
    let credit_days = command.credit_days.map(CreditDays::new).transpose()?;

    let items = command
      .items
      .into_iter()
      .map(|item| {
        let description = LineItemDescription::new(item.description)?;
        let quantity = Quantity::new(item.quantity)?;
        let unit = match item.unit {
          Some(unit) => UnitLabel::new(unit)?,
          None => UnitLabel::default(),
        };
        let unit_price = u64::try_from(item.unit_price).map_err(|_| {
          ValidationError::InvalidUnitPrice("Unit price cannot be negative".to_string())
        })?;
        InvoiceLineItem::new(description, quantity, unit, unit_price)
      })
      .collect::<Result<Vec<_>, ValidationError>>()?;

    InvoiceDraft::new(
      client_type,
      client_name,
      items,
      command.issue_date,
      payment_terms,
      credit_days,
      command.due_date,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::memory_pipeline;
  use rust_decimal_macros::dec;

  fn command() -> CreateInvoiceCommand {
    CreateInvoiceCommand {
      client_type: "COMPANY".to_string(),
      client_name: "EOBO CAFÉ".to_string(),
      items: vec![CreateInvoiceLineItemDto {
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

  #[tokio::test]
  async fn test_create_invoice() {
    let use_case = CreateInvoiceUseCase::new(memory_pipeline());
    let response = use_case.execute(command()).await.unwrap();

    assert_eq!(response.invoice_number, 1);
    assert_eq!(response.total_amount, 170_000);
    assert_eq!(response.total_amount_text, "ciento setenta mil pesos (COP)");
    assert_eq!(response.due_date, NaiveDate::from_ymd_opt(2026, 1, 4));
    assert_eq!(response.blob_id.len(), 64);
  }

  #[tokio::test]
  async fn test_rejects_negative_price() {
    let use_case = CreateInvoiceUseCase::new(memory_pipeline());
    let mut command = command();
    command.items[0].unit_price = -1;

    let result = use_case.execute(command).await;
    assert!(matches!(
      result,
      Err(InvoiceError::Validation(ValidationError::InvalidUnitPrice(_)))
    ));
  }

  #[tokio::test]
  async fn test_rejects_empty_items() {
    let use_case = CreateInvoiceUseCase::new(memory_pipeline());
    let mut command = command();
    command.items.clear();

    let result = use_case.execute(command).await;
    assert!(matches!(
      result,
      Err(InvoiceError::Validation(ValidationError::NoLineItems))
    ));
  }

  #[tokio::test]
  async fn test_rejects_unknown_payment_terms() {
    let use_case = CreateInvoiceUseCase::new(memory_pipeline());
    let mut command = command();
    command.payment_terms = "LAYAWAY".to_string();

    assert!(use_case.execute(command).await.is_err());
  }

  #[tokio::test]
  async fn test_validation_failure_does_not_burn_a_number() {
    let pipeline = memory_pipeline();
    let use_case = CreateInvoiceUseCase::new(pipeline.clone());

    let mut bad = command();
    bad.credit_days = Some(400);
    assert!(use_case.execute(bad).await.is_err());

    let response = use_case.execute(command()).await.unwrap();
    assert_eq!(response.invoice_number, 1);
  }
}
