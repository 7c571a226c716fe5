use std::sync::Arc;
use tracing::{debug, instrument};

use super::errors::StoreError;
use super::ports::CounterStore;

/// Counter that numbers invoices.
pub const INVOICE_NUMBER_COUNTER: &str = "invoice_number";

/// Hands out strictly increasing numbers per counter name.
///
/// Atomicity is delegated to the store's native increment. Failures are
/// returned as-is; nothing is retried here.
#[derive(Clone)]
pub struct SequenceAllocator {
  store: Arc<dyn CounterStore>,
}

impl SequenceAllocator {
  pub fn new(store: Arc<dyn CounterStore>) -> Self {
    Self { store }
  }

  #[instrument(skip(self))]
  pub async fn allocate(&self, counter_name: &str) -> Result<u64, StoreError> {
    let value = self.store.find_and_increment(counter_name).await?;
    debug!(counter = counter_name, value, "Allocated sequence value");
    Ok(value)
  }
}
