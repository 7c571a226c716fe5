use async_trait::async_trait;
use uuid::Uuid;

use super::entities::InvoiceRecord;
use super::errors::{InvoiceError, StoreError};
use super::value_objects::{BlobId, InvoiceNumber};
use crate::domain::document::{DocumentComposer, InvoiceContent};

/// Durable named counters.
#[async_trait]
pub trait CounterStore: Send + Sync {
  /// Atomically increments `name` and returns the new value. A missing
  /// counter is created at 0 first, so the first call returns 1.
  async fn find_and_increment(&self, name: &str) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Fails with `StoreError::DuplicateKey` when the invoice number is taken.
  async fn insert(&self, record: InvoiceRecord) -> Result<InvoiceRecord, StoreError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<InvoiceRecord>, StoreError>;
  async fn find_by_number(
    &self,
    number: InvoiceNumber,
  ) -> Result<Option<InvoiceRecord>, StoreError>;
}

/// Storage for rendered documents.
#[async_trait]
pub trait BlobStore: Send + Sync {
  async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str)
  -> Result<BlobId, StoreError>;
  async fn get(&self, id: &BlobId) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Turns composed page content into document bytes.
pub trait DocumentRenderer: Send + Sync {
  fn content_type(&self) -> &'static str;
  fn render(
    &self,
    composer: &DocumentComposer,
    content: &InvoiceContent<'_>,
  ) -> Result<Vec<u8>, InvoiceError>;
}
