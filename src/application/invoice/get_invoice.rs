use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoicePipeline, InvoiceRecord};

#[derive(Debug, Deserialize)]
pub struct GetInvoiceCommand {
  pub invoice_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct InvoiceLineItemDto {
  pub description: String,
  pub quantity: Decimal,
  pub unit: String,
  pub unit_price: u64,
  pub subtotal: u64,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  pub id: Uuid,
  pub invoice_number: u64,
  pub client_type: String,
  pub client_name: String,
  pub items: Vec<InvoiceLineItemDto>,
  pub issue_date: NaiveDate,
  pub payment_terms: String,
  pub credit_days: Option<u16>,
  pub total_amount: u64,
  pub total_amount_text: String,
  pub due_date: Option<NaiveDate>,
  pub blob_id: String,
  pub created_at: DateTime<Utc>,
}

impl From<InvoiceRecord> for InvoiceDetailsResponse {
  fn from(record: InvoiceRecord) -> Self {
    let items = record
      .items
      .iter()
      .map(|item| InvoiceLineItemDto {
        description: item.description().value().to_string(),
        quantity: item.quantity().value(),
        unit: item.unit().value().to_string(),
        unit_price: item.unit_price(),
        subtotal: item.subtotal(),
      })
      .collect();

    Self {
      id: record.id,
      invoice_number: record.invoice_number.value(),
      client_type: record.client_type.as_str().to_string(),
      client_name: record.client_name.value().to_string(),
      items,
      issue_date: record.issue_date,
      payment_terms: record.payment_terms.as_str().to_string(),
      credit_days: record.credit_days.map(|d| d.value()),
      total_amount: record.total_amount,
      total_amount_text: record.total_amount_text,
      due_date: record.due_date,
      blob_id: record.blob_id.value().to_string(),
      created_at: record.created_at,
    }
  }
}

pub struct GetInvoiceUseCase {
  pipeline: Arc<InvoicePipeline>,
}

impl GetInvoiceUseCase {
  pub fn new(pipeline: Arc<InvoicePipeline>) -> Self {
    Self { pipeline }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let record = self.pipeline.find_invoice(command.invoice_id).await?;
    Ok(record.into())
  }
}
