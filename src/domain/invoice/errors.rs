use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValidationError;

/// Failures reported by the counter, metadata and blob stores.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Operation timed out: {0}")]
  Timeout(String),

  #[error("Query failed: {0}")]
  QueryFailed(String),

  #[error("Duplicate key: {0}")]
  DuplicateKey(String),

  #[error("Corrupt record: {0}")]
  Corrupt(String),
}

/// Pipeline step during which a store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
  /// Allocating the invoice number. No number was issued.
  Allocation,
  /// Storing the document or its metadata. The number was issued.
  Persistence { invoice_number: u64 },
  /// Reading a stored invoice back.
  Retrieval,
}

impl fmt::Display for StorePhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StorePhase::Allocation => write!(f, "number allocation"),
      StorePhase::Persistence { invoice_number } => {
        write!(f, "persistence of invoice {}", invoice_number)
      }
      StorePhase::Retrieval => write!(f, "retrieval"),
    }
  }
}

// Automatic conversions from external error types

impl From<sqlx::Error> for StoreError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          StoreError::DuplicateKey(db_err.message().to_string())
        } else {
          StoreError::QueryFailed(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => StoreError::Timeout("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool closed".to_string()),
      sqlx::Error::Io(e) => StoreError::ConnectionFailed(e.to_string()),
      sqlx::Error::Tls(e) => StoreError::ConnectionFailed(e.to_string()),
      sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
        StoreError::Corrupt(error.to_string())
      }
      _ => StoreError::QueryFailed(error.to_string()),
    }
  }
}

impl From<redis::RedisError> for StoreError {
  fn from(error: redis::RedisError) -> Self {
    if error.is_timeout() {
      StoreError::Timeout(error.to_string())
    } else if error.is_io_error() || error.is_connection_refusal() || error.is_connection_dropped()
    {
      StoreError::ConnectionFailed(error.to_string())
    } else {
      StoreError::QueryFailed(error.to_string())
    }
  }
}

impl From<ValidationError> for StoreError {
  fn from(error: ValidationError) -> Self {
    StoreError::Corrupt(error.to_string())
  }
}

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Store unavailable during {phase}: {source}")]
  StoreUnavailable {
    phase: StorePhase,
    #[source]
    source: StoreError,
  },

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Document for invoice {0} not found")]
  DocumentNotFound(u64),

  #[error("Document rendering failed: {0}")]
  RenderFailed(String),
}

impl InvoiceError {
  pub fn store(phase: StorePhase, source: StoreError) -> Self {
    InvoiceError::StoreUnavailable { phase, source }
  }

  /// Number that was allocated before the failure, if any.
  ///
  /// Operators use it to reconcile numbers that were issued but whose
  /// document may not have been stored.
  pub fn issued_number(&self) -> Option<u64> {
    match self {
      InvoiceError::StoreUnavailable {
        phase: StorePhase::Persistence { invoice_number },
        ..
      } => Some(*invoice_number),
      _ => None,
    }
  }
}
