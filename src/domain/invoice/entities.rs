use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{
  BlobId, ClientName, ClientType, CreditDays, InvoiceNumber, LineItemDescription, PaymentTerms,
  Quantity, UnitLabel, ValidationError,
};
use crate::domain::localization::UnsupportedMagnitude;

// Invoice Line Item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
  description: LineItemDescription,
  quantity: Quantity,
  unit: UnitLabel,
  unit_price: u64,
  subtotal: u64,
}

impl InvoiceLineItem {
  /// Builds a line and fixes its subtotal.
  ///
  /// The subtotal is `quantity * unit_price` rounded to whole pesos, with
  /// halves rounded away from zero (1.5 x 3 = 4.5 -> 5).
  pub fn new(
    description: LineItemDescription,
    quantity: Quantity,
    unit: UnitLabel,
    unit_price: u64,
  ) -> Result<Self, ValidationError> {
    let subtotal = quantity
      .value()
      .checked_mul(Decimal::from(unit_price))
      .map(|raw| raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
      .and_then(|rounded| rounded.to_u64())
      .ok_or_else(|| {
        ValidationError::InvalidUnitPrice("Line subtotal is out of range".to_string())
      })?;

    Ok(Self {
      description,
      quantity,
      unit,
      unit_price,
      subtotal,
    })
  }

  pub fn description(&self) -> &LineItemDescription {
    &self.description
  }

  pub fn quantity(&self) -> &Quantity {
    &self.quantity
  }

  pub fn unit(&self) -> &UnitLabel {
    &self.unit
  }

  pub fn unit_price(&self) -> u64 {
    self.unit_price
  }

  pub fn subtotal(&self) -> u64 {
    self.subtotal
  }
}

// Invoice Draft - everything the caller provides for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
  pub client_type: ClientType,
  pub client_name: ClientName,
  pub items: Vec<InvoiceLineItem>,
  pub issue_date: NaiveDate,
  pub payment_terms: PaymentTerms,
  pub credit_days: Option<CreditDays>,
  pub due_date_override: Option<NaiveDate>,
}

impl InvoiceDraft {
  pub fn new(
    client_type: ClientType,
    client_name: ClientName,
    items: Vec<InvoiceLineItem>,
    issue_date: NaiveDate,
    payment_terms: PaymentTerms,
    credit_days: Option<CreditDays>,
    due_date_override: Option<NaiveDate>,
  ) -> Result<Self, ValidationError> {
    if items.is_empty() {
      return Err(ValidationError::NoLineItems);
    }

    items
      .iter()
      .try_fold(0u64, |total, item| total.checked_add(item.subtotal()))
      .ok_or(ValidationError::TotalOutOfRange)?;

    if let Some(due_date) = due_date_override {
      if due_date < issue_date {
        return Err(ValidationError::InvalidDueDate(format!(
          "Due date {} is before issue date {}",
          due_date, issue_date
        )));
      }
    }

    let days = credit_days.map(|d| d.value()).unwrap_or(0);
    if issue_date.checked_add_days(Days::new(days as u64)).is_none() {
      return Err(ValidationError::InvalidDueDate(
        "Due date is out of range".to_string(),
      ));
    }

    Ok(Self {
      client_type,
      client_name,
      items,
      issue_date,
      payment_terms,
      credit_days,
      due_date_override,
    })
  }
}

/// Output of one pipeline run: the allocated number, derived figures and the
/// rendered document. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInvoice {
  invoice_number: InvoiceNumber,
  total_amount: u64,
  total_amount_text: String,
  due_date: Option<NaiveDate>,
  document: Vec<u8>,
  unsupported_magnitude: Option<UnsupportedMagnitude>,
}

impl RenderedInvoice {
  pub fn new(
    invoice_number: InvoiceNumber,
    total_amount: u64,
    total_amount_text: String,
    due_date: Option<NaiveDate>,
    document: Vec<u8>,
    unsupported_magnitude: Option<UnsupportedMagnitude>,
  ) -> Self {
    Self {
      invoice_number,
      total_amount,
      total_amount_text,
      due_date,
      document,
      unsupported_magnitude,
    }
  }

  pub fn invoice_number(&self) -> InvoiceNumber {
    self.invoice_number
  }

  pub fn total_amount(&self) -> u64 {
    self.total_amount
  }

  pub fn total_amount_text(&self) -> &str {
    &self.total_amount_text
  }

  pub fn due_date(&self) -> Option<NaiveDate> {
    self.due_date
  }

  pub fn document(&self) -> &[u8] {
    &self.document
  }

  /// Present when the total was printed as digits instead of words.
  pub fn unsupported_magnitude(&self) -> Option<UnsupportedMagnitude> {
    self.unsupported_magnitude
  }
}

// Invoice Record - the metadata document stored once per issued invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
  pub id: Uuid,
  pub invoice_number: InvoiceNumber,
  pub client_type: ClientType,
  pub client_name: ClientName,
  pub items: Vec<InvoiceLineItem>,
  pub issue_date: NaiveDate,
  pub payment_terms: PaymentTerms,
  pub credit_days: Option<CreditDays>,
  pub total_amount: u64,
  pub due_date: Option<NaiveDate>,
  pub total_amount_text: String,
  pub blob_id: BlobId,
  pub created_at: DateTime<Utc>,
}

impl InvoiceRecord {
  pub fn new(draft: &InvoiceDraft, rendered: &RenderedInvoice, blob_id: BlobId) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_number: rendered.invoice_number(),
      client_type: draft.client_type,
      client_name: draft.client_name.clone(),
      items: draft.items.clone(),
      issue_date: draft.issue_date,
      payment_terms: draft.payment_terms,
      credit_days: draft.credit_days,
      total_amount: rendered.total_amount(),
      due_date: rendered.due_date(),
      total_amount_text: rendered.total_amount_text().to_string(),
      blob_id,
      created_at: Utc::now(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn item(quantity: Decimal, unit_price: u64) -> InvoiceLineItem {
    InvoiceLineItem::new(
      LineItemDescription::new("Cafe 340 gr".to_string()).unwrap(),
      Quantity::new(quantity).unwrap(),
      UnitLabel::default(),
      unit_price,
    )
    .unwrap()
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn draft(
    items: Vec<InvoiceLineItem>,
    due_date_override: Option<NaiveDate>,
  ) -> Result<InvoiceDraft, ValidationError> {
    InvoiceDraft::new(
      ClientType::Company,
      ClientName::new("EOBO CAFÉ".to_string()).unwrap(),
      items,
      date(2025, 12, 15),
      PaymentTerms::Credit,
      Some(CreditDays::new(20).unwrap()),
      due_date_override,
    )
  }

  #[test]
  fn test_subtotal_rounds_half_away_from_zero() {
    assert_eq!(item(dec!(1.5), 3).subtotal(), 5);
    assert_eq!(item(dec!(2.5), 1).subtotal(), 3);
    assert_eq!(item(dec!(1.25), 2).subtotal(), 3);
    assert_eq!(item(dec!(0.4), 1).subtotal(), 0);
  }

  #[test]
  fn test_subtotal_whole_quantities() {
    assert_eq!(item(dec!(1), 170_000).subtotal(), 170_000);
    assert_eq!(item(dec!(3), 12_500).subtotal(), 37_500);
  }

  #[test]
  fn test_subtotal_out_of_range() {
    let result = InvoiceLineItem::new(
      LineItemDescription::new("Huge".to_string()).unwrap(),
      Quantity::new(dec!(2)).unwrap(),
      UnitLabel::default(),
      u64::MAX,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_draft_requires_items() {
    assert_eq!(draft(vec![], None), Err(ValidationError::NoLineItems));
  }

  #[test]
  fn test_draft_rejects_override_before_issue_date() {
    let result = draft(vec![item(dec!(1), 100)], Some(date(2025, 12, 1)));
    assert!(matches!(result, Err(ValidationError::InvalidDueDate(_))));
  }

  #[test]
  fn test_draft_accepts_override_on_issue_date() {
    assert!(draft(vec![item(dec!(1), 100)], Some(date(2025, 12, 15))).is_ok());
  }

  #[test]
  fn test_draft_rejects_total_overflow() {
    let big = u64::MAX / 2 + 1;
    let result = draft(vec![item(dec!(1), big), item(dec!(1), big)], None);
    assert_eq!(result, Err(ValidationError::TotalOutOfRange));
  }
}
