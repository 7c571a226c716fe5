use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;

use crate::domain::invoice::{CounterStore, StoreError};

/// Counters in the `sequence_counters` table.
///
/// Each increment is a single upsert statement, so concurrent callers are
/// serialized by the row lock and never see the same value.
pub struct PostgresCounterStore {
  pool: PgPool,
  timeout: Duration,
}

impl PostgresCounterStore {
  pub fn new(pool: PgPool, timeout: Duration) -> Self {
    Self { pool, timeout }
  }
}

#[async_trait]
impl CounterStore for PostgresCounterStore {
  async fn find_and_increment(&self, name: &str) -> Result<u64, StoreError> {
    let query = sqlx::query_scalar::<_, i64>(
      r#"
            INSERT INTO sequence_counters (name, value, updated_at)
            VALUES ($1, 1, NOW())
            ON CONFLICT (name) DO UPDATE
            SET value = sequence_counters.value + 1, updated_at = NOW()
            RETURNING value
            "#,
    )
    .bind(name)
    .fetch_one(&self.pool);

    let value = tokio::time::timeout(self.timeout, query)
      .await
      .map_err(|_| {
        StoreError::Timeout(format!(
          "Counter {} not incremented within {:?}",
          name, self.timeout
        ))
      })??;

    u64::try_from(value)
      .map_err(|_| StoreError::Corrupt(format!("Counter {} holds {}", name, value)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sqlx::postgres::PgPoolOptions;
  use std::collections::BTreeSet;
  use std::sync::Arc;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{runners::AsyncRunner, ContainerAsync};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(10)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  fn store(pool: PgPool) -> PostgresCounterStore {
    PostgresCounterStore::new(pool, Duration::from_secs(5))
  }

  #[tokio::test]
  async fn test_missing_counter_starts_at_one() {
    let (pool, _container) = setup_test_db().await;
    let store = store(pool);

    assert_eq!(store.find_and_increment("invoice_number").await.unwrap(), 1);
    assert_eq!(store.find_and_increment("invoice_number").await.unwrap(), 2);
    assert_eq!(store.find_and_increment("other").await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_continues_from_existing_value() {
    let (pool, _container) = setup_test_db().await;
    sqlx::query("INSERT INTO sequence_counters (name, value) VALUES ('invoice_number', 99)")
      .execute(&pool)
      .await
      .unwrap();

    let store = store(pool);
    assert_eq!(store.find_and_increment("invoice_number").await.unwrap(), 100);
  }

  #[tokio::test]
  async fn test_concurrent_increments_are_distinct() {
    let (pool, _container) = setup_test_db().await;
    let store = Arc::new(store(pool));

    let handles: Vec<_> = (0..20)
      .map(|_| {
        let store = store.clone();
        tokio::spawn(async move { store.find_and_increment("invoice_number").await })
      })
      .collect();

    let mut values = BTreeSet::new();
    for handle in handles {
      values.insert(handle.await.unwrap().unwrap());
    }
    assert_eq!(values, (1..=20).collect::<BTreeSet<u64>>());
  }
}
