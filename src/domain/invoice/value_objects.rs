use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
  #[error("Invalid client type: {0}")]
  InvalidClientType(String),
  #[error("Invalid client name: {0}")]
  InvalidClientName(String),
  #[error("Invalid payment terms: {0}")]
  InvalidPaymentTerms(String),
  #[error("Invalid line item description: {0}")]
  InvalidDescription(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid unit: {0}")]
  InvalidUnit(String),
  #[error("Invalid unit price: {0}")]
  InvalidUnitPrice(String),
  #[error("Invalid credit days: {0}")]
  InvalidCreditDays(String),
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid due date: {0}")]
  InvalidDueDate(String),
  #[error("No line items provided")]
  NoLineItems,
  #[error("Invoice total is out of range")]
  TotalOutOfRange,
}

// Client Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientType {
  Company,
  Person,
}

impl ClientType {
  pub fn as_str(&self) -> &'static str {
    match self {
      ClientType::Company => "COMPANY",
      ClientType::Person => "PERSON",
    }
  }
}

impl FromStr for ClientType {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_uppercase().as_str() {
      "COMPANY" => Ok(ClientType::Company),
      "PERSON" => Ok(ClientType::Person),
      _ => Err(ValidationError::InvalidClientType(format!(
        "Unknown client type: {}",
        s
      ))),
    }
  }
}

// Payment Terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTerms {
  Cash,
  Credit,
}

impl PaymentTerms {
  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentTerms::Cash => "CASH",
      PaymentTerms::Credit => "CREDIT",
    }
  }
}

impl FromStr for PaymentTerms {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_uppercase().as_str() {
      "CASH" => Ok(PaymentTerms::Cash),
      "CREDIT" => Ok(PaymentTerms::Credit),
      _ => Err(ValidationError::InvalidPaymentTerms(format!(
        "Unknown payment terms: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for PaymentTerms {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// Client Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientName(String);

impl ClientName {
  pub fn new(value: String) -> Result<Self, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValidationError::InvalidClientName(
        "Client name cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > 255 {
      return Err(ValidationError::InvalidClientName(
        "Client name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ClientName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// Line Item Description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDescription(String);

impl LineItemDescription {
  pub fn new(value: String) -> Result<Self, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValidationError::InvalidDescription(
        "Description cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > 500 {
      return Err(ValidationError::InvalidDescription(
        "Description cannot exceed 500 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Unit label ("und", "kg", "caja", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLabel(String);

impl UnitLabel {
  pub const DEFAULT: &'static str = "und";

  pub fn new(value: String) -> Result<Self, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValidationError::InvalidUnit(
        "Unit cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > 32 {
      return Err(ValidationError::InvalidUnit(
        "Unit cannot exceed 32 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl Default for UnitLabel {
  fn default() -> Self {
    Self(Self::DEFAULT.to_string())
  }
}

// Quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(Decimal);

impl Quantity {
  pub fn new(value: Decimal) -> Result<Self, ValidationError> {
    if value <= Decimal::ZERO {
      return Err(ValidationError::InvalidQuantity(
        "Quantity must be positive".to_string(),
      ));
    }
    // Max 4 decimal places
    if value.normalize().scale() > 4 {
      return Err(ValidationError::InvalidQuantity(
        "Quantity cannot have more than 4 decimal places".to_string(),
      ));
    }
    Ok(Self(value.normalize()))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn is_whole(&self) -> bool {
    self.0.fract().is_zero()
  }
}

impl fmt::Display for Quantity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.normalize())
  }
}

// Credit days (0..=365)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreditDays(u16);

impl CreditDays {
  pub const MAX: i64 = 365;

  pub fn new(days: i64) -> Result<Self, ValidationError> {
    if !(0..=Self::MAX).contains(&days) {
      return Err(ValidationError::InvalidCreditDays(format!(
        "Credit days must be between 0 and {}, got {}",
        Self::MAX,
        days
      )));
    }
    Ok(Self(days as u16))
  }

  pub fn value(&self) -> u16 {
    self.0
  }
}

// Invoice Number - allocated from the sequence counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvoiceNumber(u64);

impl InvoiceNumber {
  pub fn new(value: u64) -> Result<Self, ValidationError> {
    if value == 0 {
      return Err(ValidationError::InvalidInvoiceNumber(
        "Invoice number must be positive".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> u64 {
    self.0
  }

  /// Name under which the rendered document is stored.
  pub fn document_name(&self) -> String {
    format!("invoice-{}.pdf", self.0)
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Blob ID - content address of a stored document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobId(String);

impl BlobId {
  /// SHA-256 of the content, hex encoded.
  pub fn for_content(bytes: &[u8]) -> Self {
    Self(hex::encode(Sha256::digest(bytes)))
  }

  pub fn parse(value: &str) -> Option<Self> {
    let is_digest = value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit());
    is_digest.then(|| Self(value.to_ascii_lowercase()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for BlobId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
