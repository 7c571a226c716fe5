use chrono::{Days, NaiveDate};

use super::entities::InvoiceDraft;
use super::value_objects::{PaymentTerms, ValidationError};

/// Sum of the rounded line subtotals.
pub fn compute_total(draft: &InvoiceDraft) -> Result<u64, ValidationError> {
  draft
    .items
    .iter()
    .try_fold(0u64, |total, item| total.checked_add(item.subtotal()))
    .ok_or(ValidationError::TotalOutOfRange)
}

/// Due date for the draft.
///
/// An explicit override always wins. Otherwise cash terms have no due date
/// and credit terms fall due `credit_days` after the issue date (0 when
/// absent).
pub fn compute_due_date(draft: &InvoiceDraft) -> Result<Option<NaiveDate>, ValidationError> {
  if let Some(due_date) = draft.due_date_override {
    return Ok(Some(due_date));
  }

  match draft.payment_terms {
    PaymentTerms::Cash => Ok(None),
    PaymentTerms::Credit => {
      let days = draft.credit_days.map(|d| d.value()).unwrap_or(0);
      draft
        .issue_date
        .checked_add_days(Days::new(days as u64))
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidDueDate("Due date is out of range".to_string()))
    }
  }
}
