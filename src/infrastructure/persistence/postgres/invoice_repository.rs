use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  BlobId, ClientName, ClientType, CreditDays, InvoiceLineItem, InvoiceNumber, InvoiceRecord,
  InvoiceRepository, PaymentTerms, StoreError,
};

const SELECT_COLUMNS: &str = r#"
  id, invoice_number, client_type, client_name, items, issue_date, payment_terms,
  credit_days, total_amount, due_date, total_amount_text, blob_id, created_at
"#;

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  invoice_number: i64,
  client_type: String,
  client_name: String,
  items: Json<Vec<InvoiceLineItem>>,
  issue_date: NaiveDate,
  payment_terms: String,
  credit_days: Option<i32>,
  total_amount: i64,
  due_date: Option<NaiveDate>,
  total_amount_text: String,
  blob_id: String,
  created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for InvoiceRecord {
  type Error = StoreError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let invoice_number = InvoiceNumber::new(to_u64(row.invoice_number, "invoice_number")?)?;
    let client_type = ClientType::from_str(&row.client_type)?;
    let client_name = ClientName::new(row.client_name)?;
    let payment_terms = PaymentTerms::from_str(&row.payment_terms)?;
    let credit_days = row
      .credit_days
      .map(|days| CreditDays::new(days as i64))
      .transpose()?;
    let blob_id = BlobId::parse(&row.blob_id)
      .ok_or_else(|| StoreError::Corrupt(format!("Invalid blob id: {}", row.blob_id)))?;

    Ok(InvoiceRecord {
      id: row.id,
      invoice_number,
      client_type,
      client_name,
      items: row.items.0,
      issue_date: row.issue_date,
      payment_terms,
      credit_days,
      total_amount: to_u64(row.total_amount, "total_amount")?,
      due_date: row.due_date,
      total_amount_text: row.total_amount_text,
      blob_id,
      created_at: row.created_at,
    })
  }
}

fn to_u64(value: i64, column: &str) -> Result<u64, StoreError> {
  u64::try_from(value).map_err(|_| StoreError::Corrupt(format!("Negative {}: {}", column, value)))
}

fn to_i64(value: u64, column: &str) -> Result<i64, StoreError> {
  i64::try_from(value)
    .map_err(|_| StoreError::QueryFailed(format!("{} {} does not fit in BIGINT", column, value)))
}

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn insert(&self, record: InvoiceRecord) -> Result<InvoiceRecord, StoreError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            INSERT INTO invoices (
                id, invoice_number, client_type, client_name, items, issue_date,
                payment_terms, credit_days, total_amount, due_date, total_amount_text,
                blob_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
      SELECT_COLUMNS
    ))
    .bind(record.id)
    .bind(to_i64(record.invoice_number.value(), "invoice_number")?)
    .bind(record.client_type.as_str())
    .bind(record.client_name.value())
    .bind(Json(&record.items))
    .bind(record.issue_date)
    .bind(record.payment_terms.as_str())
    .bind(record.credit_days.map(|d| d.value() as i32))
    .bind(to_i64(record.total_amount, "total_amount")?)
    .bind(record.due_date)
    .bind(&record.total_amount_text)
    .bind(record.blob_id.value())
    .bind(record.created_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<InvoiceRecord>, StoreError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {} FROM invoices WHERE id = $1",
      SELECT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(InvoiceRecord::try_from).transpose()
  }

  async fn find_by_number(
    &self,
    number: InvoiceNumber,
  ) -> Result<Option<InvoiceRecord>, StoreError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {} FROM invoices WHERE invoice_number = $1",
      SELECT_COLUMNS
    ))
    .bind(to_i64(number.value(), "invoice_number")?)
    .fetch_optional(&self.pool)
    .await?;

    row.map(InvoiceRecord::try_from).transpose()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{LineItemDescription, Quantity, UnitLabel};
  use rust_decimal_macros::dec;
  use sqlx::postgres::PgPoolOptions;
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
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  fn record(number: u64) -> InvoiceRecord {
    let item = InvoiceLineItem::new(
      LineItemDescription::new("Cafe 340 gr".to_string()).unwrap(),
      Quantity::new(dec!(1.5)).unwrap(),
      UnitLabel::new("kg".to_string()).unwrap(),
      170_000,
    )
    .unwrap();

    InvoiceRecord {
      id: Uuid::new_v4(),
      invoice_number: InvoiceNumber::new(number).unwrap(),
      client_type: ClientType::Company,
      client_name: ClientName::new("EOBO CAFÉ".to_string()).unwrap(),
      items: vec![item],
      issue_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
      payment_terms: PaymentTerms::Credit,
      credit_days: Some(CreditDays::new(20).unwrap()),
      total_amount: 255_000,
      due_date: NaiveDate::from_ymd_opt(2026, 1, 4),
      total_amount_text: "doscientos cincuenta y cinco mil pesos (COP)".to_string(),
      blob_id: BlobId::for_content(format!("document {}", number).as_bytes()),
      // Postgres keeps microseconds
      created_at: DateTime::from_timestamp(1_765_800_000, 0).unwrap(),
    }
  }

  #[tokio::test]
  async fn test_insert_and_find() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresInvoiceRepository::new(pool);
    let original = record(1);

    let inserted = repo.insert(original.clone()).await.unwrap();
    assert_eq!(inserted, original);

    let by_id = repo.find_by_id(original.id).await.unwrap();
    assert_eq!(by_id, Some(original.clone()));

    let by_number = repo
      .find_by_number(InvoiceNumber::new(1).unwrap())
      .await
      .unwrap();
    assert_eq!(by_number.map(|r| r.id), Some(original.id));
  }

  #[tokio::test]
  async fn test_duplicate_number_is_rejected() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresInvoiceRepository::new(pool);

    repo.insert(record(7)).await.unwrap();
    let result = repo.insert(record(7)).await;
    assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
  }

  #[tokio::test]
  async fn test_find_missing() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresInvoiceRepository::new(pool);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    assert!(
      repo
        .find_by_number(InvoiceNumber::new(404).unwrap())
        .await
        .unwrap()
        .is_none()
    );
  }
}
