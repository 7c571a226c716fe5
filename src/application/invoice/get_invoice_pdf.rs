use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoicePipeline};

#[derive(Debug)]
pub struct GetInvoicePdfCommand {
  pub invoice_id: Uuid,
}

#[derive(Debug)]
pub struct InvoicePdfResponse {
  pub filename: String,
  pub content_type: &'static str,
  pub bytes: Vec<u8>,
}

pub struct GetInvoicePdfUseCase {
  pipeline: Arc<InvoicePipeline>,
}

impl GetInvoicePdfUseCase {
  pub fn new(pipeline: Arc<InvoicePipeline>) -> Self {
    Self { pipeline }
  }

  pub async fn execute(
    &self,
    command: GetInvoicePdfCommand,
  ) -> Result<InvoicePdfResponse, InvoiceError> {
    let (record, bytes) = self.pipeline.fetch_document(command.invoice_id).await?;

    Ok(InvoicePdfResponse {
      filename: record.invoice_number.document_name(),
      content_type: self.pipeline.content_type(),
      bytes,
    })
  }
}
