use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;

use crate::domain::invoice::{CounterStore, StoreError};

/// Counters kept as Redis integers under `counter:<name>`.
///
/// `INCR` treats a missing key as 0, so the first allocation returns 1.
pub struct RedisCounterStore {
  connection: ConnectionManager,
  timeout: Duration,
}

impl RedisCounterStore {
  pub fn new(connection: ConnectionManager, timeout: Duration) -> Self {
    Self {
      connection,
      timeout,
    }
  }

  pub fn key(name: &str) -> String {
    format!("counter:{}", name)
  }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
  async fn find_and_increment(&self, name: &str) -> Result<u64, StoreError> {
    let mut connection = self.connection.clone();
    let key = Self::key(name);

    let value: i64 = tokio::time::timeout(self.timeout, connection.incr::<_, _, i64>(&key, 1))
      .await
      .map_err(|_| {
        StoreError::Timeout(format!("INCR {} did not complete within {:?}", key, self.timeout))
      })??;

    u64::try_from(value).map_err(|_| StoreError::Corrupt(format!("{} holds {}", key, value)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_key_layout() {
    assert_eq!(RedisCounterStore::key("invoice_number"), "counter:invoice_number");
  }
}
