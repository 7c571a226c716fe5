use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::invoice::{
  BlobId, BlobStore, CounterStore, InvoiceNumber, InvoiceRecord, InvoiceRepository, StoreError,
};

/// Counters held in process memory. Values are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
  counters: Mutex<HashMap<String, u64>>,
}

impl InMemoryCounterStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Store whose counter `name` already holds `value`.
  pub fn with_value(name: &str, value: u64) -> Self {
    let mut counters = HashMap::new();
    counters.insert(name.to_string(), value);
    Self {
      counters: Mutex::new(counters),
    }
  }

  pub async fn current(&self, name: &str) -> Option<u64> {
    self.counters.lock().await.get(name).copied()
  }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
  async fn find_and_increment(&self, name: &str) -> Result<u64, StoreError> {
    let mut counters = self.counters.lock().await;
    let value = counters.entry(name.to_string()).or_insert(0);
    *value = value
      .checked_add(1)
      .ok_or_else(|| StoreError::QueryFailed(format!("Counter {} overflowed", name)))?;
    Ok(*value)
  }
}

#[derive(Debug, Default)]
pub struct InMemoryInvoiceRepository {
  records: RwLock<HashMap<Uuid, InvoiceRecord>>,
}

impl InMemoryInvoiceRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn len(&self) -> usize {
    self.records.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.records.read().await.is_empty()
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn insert(&self, record: InvoiceRecord) -> Result<InvoiceRecord, StoreError> {
    let mut records = self.records.write().await;
    if records
      .values()
      .any(|existing| existing.invoice_number == record.invoice_number)
    {
      return Err(StoreError::DuplicateKey(format!(
        "invoice_number {}",
        record.invoice_number
      )));
    }
    records.insert(record.id, record.clone());
    Ok(record)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<InvoiceRecord>, StoreError> {
    Ok(self.records.read().await.get(&id).cloned())
  }

  async fn find_by_number(
    &self,
    number: InvoiceNumber,
  ) -> Result<Option<InvoiceRecord>, StoreError> {
    Ok(
      self
        .records
        .read()
        .await
        .values()
        .find(|record| record.invoice_number == number)
        .cloned(),
    )
  }
}

#[derive(Debug, Clone)]
struct StoredBlob {
  name: String,
  bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
  blobs: RwLock<HashMap<BlobId, StoredBlob>>,
}

impl InMemoryBlobStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Name the blob was first stored under.
  pub async fn name_of(&self, id: &BlobId) -> Option<String> {
    self.blobs.read().await.get(id).map(|blob| blob.name.clone())
  }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
  async fn put(
    &self,
    name: &str,
    bytes: Vec<u8>,
    _content_type: &str,
  ) -> Result<BlobId, StoreError> {
    let id = BlobId::for_content(&bytes);
    self
      .blobs
      .write()
      .await
      .entry(id.clone())
      .or_insert_with(|| StoredBlob {
        name: name.to_string(),
        bytes,
      });
    Ok(id)
  }

  async fn get(&self, id: &BlobId) -> Result<Option<Vec<u8>>, StoreError> {
    Ok(self.blobs.read().await.get(id).map(|blob| blob.bytes.clone()))
  }
}
