use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::calculator::{compute_due_date, compute_total};
use super::entities::{InvoiceDraft, InvoiceRecord, RenderedInvoice};
use super::errors::{InvoiceError, StoreError, StorePhase};
use super::ports::{BlobStore, CounterStore, DocumentRenderer, InvoiceRepository};
use super::sequence::{INVOICE_NUMBER_COUNTER, SequenceAllocator};
use super::value_objects::InvoiceNumber;
use crate::domain::document::{DocumentComposer, InvoiceContent};
use crate::domain::localization::amount_to_words;

/// Collaborators wired into an [`InvoicePipeline`].
pub struct InvoicePipelineDependencies {
  pub counter_store: Arc<dyn CounterStore>,
  pub invoice_repo: Arc<dyn InvoiceRepository>,
  pub blob_store: Arc<dyn BlobStore>,
  pub renderer: Arc<dyn DocumentRenderer>,
  pub composer: DocumentComposer,
  pub counter_name: String,
}

impl InvoicePipelineDependencies {
  pub fn new(
    counter_store: Arc<dyn CounterStore>,
    invoice_repo: Arc<dyn InvoiceRepository>,
    blob_store: Arc<dyn BlobStore>,
    renderer: Arc<dyn DocumentRenderer>,
    composer: DocumentComposer,
  ) -> Self {
    Self {
      counter_store,
      invoice_repo,
      blob_store,
      renderer,
      composer,
      counter_name: INVOICE_NUMBER_COUNTER.to_string(),
    }
  }
}

/// Allocates a number, derives the figures, renders the document and stores it.
pub struct InvoicePipeline {
  allocator: SequenceAllocator,
  invoice_repo: Arc<dyn InvoiceRepository>,
  blob_store: Arc<dyn BlobStore>,
  renderer: Arc<dyn DocumentRenderer>,
  composer: DocumentComposer,
  counter_name: String,
}

impl InvoicePipeline {
  pub fn new(deps: InvoicePipelineDependencies) -> Self {
    Self {
      allocator: SequenceAllocator::new(deps.counter_store),
      invoice_repo: deps.invoice_repo,
      blob_store: deps.blob_store,
      renderer: deps.renderer,
      composer: deps.composer,
      counter_name: deps.counter_name,
    }
  }

  /// Media type of the documents this pipeline produces.
  pub fn content_type(&self) -> &'static str {
    self.renderer.content_type()
  }

  /// Takes the next invoice number. Nothing is issued on failure.
  pub async fn allocate(&self) -> Result<InvoiceNumber, InvoiceError> {
    let value = self
      .allocator
      .allocate(&self.counter_name)
      .await
      .map_err(|e| {
        warn!(counter = %self.counter_name, error = %e, "Invoice number allocation failed");
        InvoiceError::store(StorePhase::Allocation, e)
      })?;

    InvoiceNumber::new(value).map_err(|e| {
      InvoiceError::store(StorePhase::Allocation, StoreError::Corrupt(e.to_string()))
    })
  }

  /// Renders the document for an already allocated number. Pure: the same
  /// draft and number always give the same bytes.
  pub fn render(
    &self,
    number: InvoiceNumber,
    draft: &InvoiceDraft,
  ) -> Result<RenderedInvoice, InvoiceError> {
    let total_amount = compute_total(draft)?;
    let due_date = compute_due_date(draft)?;

    let words = amount_to_words(total_amount);
    let unsupported = words.degraded();
    if let Some(magnitude) = unsupported {
      warn!(
        invoice_number = number.value(),
        amount = magnitude.amount,
        "Total printed as digits: {}",
        magnitude
      );
    }
    let total_amount_text = words.into_text();

    let content = InvoiceContent {
      number,
      draft,
      total_amount,
      total_amount_text: &total_amount_text,
      due_date,
    };
    let document = self.renderer.render(&self.composer, &content)?;

    Ok(RenderedInvoice::new(
      number,
      total_amount,
      total_amount_text,
      due_date,
      document,
      unsupported,
    ))
  }

  /// Allocates a number and renders the draft with it.
  #[instrument(skip(self, draft), fields(client = %draft.client_name))]
  pub async fn generate(&self, draft: &InvoiceDraft) -> Result<RenderedInvoice, InvoiceError> {
    let number = self.allocate().await?;
    self.render(number, draft).map_err(|e| {
      error!(
        invoice_number = number.value(),
        error = %e,
        "Invoice number issued but document could not be rendered"
      );
      e
    })
  }

  /// Stores the document and its metadata record.
  ///
  /// Safe to call again for the same rendered invoice: the blob is content
  /// addressed and an existing record for the number is returned as is when
  /// it points at the same document. A record for the number holding a
  /// different document is a numbering collision and fails.
  #[instrument(skip_all, fields(invoice_number = rendered.invoice_number().value()))]
  pub async fn persist(
    &self,
    draft: &InvoiceDraft,
    rendered: &RenderedInvoice,
  ) -> Result<InvoiceRecord, InvoiceError> {
    let number = rendered.invoice_number();
    let phase = StorePhase::Persistence {
      invoice_number: number.value(),
    };
    let report = |e: StoreError| {
      error!(
        invoice_number = number.value(),
        error = %e,
        "Invoice number issued but not stored; reconcile manually"
      );
      InvoiceError::store(phase, e)
    };

    let blob_id = self
      .blob_store
      .put(
        &number.document_name(),
        rendered.document().to_vec(),
        self.renderer.content_type(),
      )
      .await
      .map_err(report)?;

    let record = InvoiceRecord::new(draft, rendered, blob_id.clone());
    match self.invoice_repo.insert(record).await {
      Ok(record) => {
        info!(
          invoice_id = %record.id,
          blob_id = %record.blob_id,
          total_amount = record.total_amount,
          "Invoice stored"
        );
        Ok(record)
      }
      Err(StoreError::DuplicateKey(_)) => {
        let existing = self
          .invoice_repo
          .find_by_number(number)
          .await
          .map_err(report)?;
        match existing {
          Some(existing) if existing.blob_id == blob_id => Ok(existing),
          Some(existing) => Err(report(StoreError::DuplicateKey(format!(
            "Invoice {} already stored for another document (id {})",
            number, existing.id
          )))),
          None => Err(report(StoreError::Corrupt(format!(
            "Invoice {} reported as duplicate but not found",
            number
          )))),
        }
      }
      Err(e) => Err(report(e)),
    }
  }

  /// Full run: allocate, render and persist.
  pub async fn issue(&self, draft: &InvoiceDraft) -> Result<InvoiceRecord, InvoiceError> {
    let rendered = self.generate(draft).await?;
    self.persist(draft, &rendered).await
  }

  pub async fn find_invoice(&self, id: Uuid) -> Result<InvoiceRecord, InvoiceError> {
    self
      .invoice_repo
      .find_by_id(id)
      .await
      .map_err(|e| InvoiceError::store(StorePhase::Retrieval, e))?
      .ok_or(InvoiceError::InvoiceNotFound(id))
  }

  /// Record and stored document bytes for `id`.
  pub async fn fetch_document(&self, id: Uuid) -> Result<(InvoiceRecord, Vec<u8>), InvoiceError> {
    let record = self.find_invoice(id).await?;
    let bytes = self
      .blob_store
      .get(&record.blob_id)
      .await
      .map_err(|e| InvoiceError::store(StorePhase::Retrieval, e))?
      .ok_or(InvoiceError::DocumentNotFound(record.invoice_number.value()))?;
    Ok((record, bytes))
  }
}
