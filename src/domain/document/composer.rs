use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::issuer::IssuerProfile;
use super::layout::{Canvas, Cursor, LayoutEngine, TextStyle};
use crate::domain::invoice::entities::InvoiceDraft;
use crate::domain::invoice::value_objects::{ClientType, InvoiceNumber, PaymentTerms};
use crate::domain::localization::{due_date_sentence, long_date, money_mcte};

const BODY: TextStyle = TextStyle::regular(9.0);
const BODY_LINE: f32 = 12.0;
const HEADING: TextStyle = TextStyle::regular(10.0);
const HEADING_BOLD: TextStyle = TextStyle::bold(10.0);
const SIGNATURE: TextStyle = TextStyle::bold(9.0);
const FOOTER: TextStyle = TextStyle::regular(8.0);

/// Everything printed on one document besides the issuer's fixed text.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceContent<'a> {
  pub number: InvoiceNumber,
  pub draft: &'a InvoiceDraft,
  pub total_amount: u64,
  pub total_amount_text: &'a str,
  pub due_date: Option<NaiveDate>,
}

/// "Suministro de ..." describing the line items and the client.
pub fn concept_sentence(draft: &InvoiceDraft) -> String {
  let tail = match draft.client_type {
    ClientType::Company => format!("para la empresa {}.", draft.client_name),
    ClientType::Person => format!("para {}.", draft.client_name),
  };

  let supplied = match draft.items.as_slice() {
    [item] if item.quantity().is_whole() => {
      let quantity = item.quantity();
      let amount = if quantity.value() == Decimal::ONE {
        "una (1) unidad".to_string()
      } else {
        format!("{} ({}) unidades", quantity, quantity)
      };
      format!("{} de {}", amount, item.description().value())
    }
    items => items
      .iter()
      .map(|item| {
        format!(
          "{} {} de {}",
          item.quantity(),
          item.unit().value(),
          item.description().value()
        )
      })
      .collect::<Vec<_>>()
      .join("; "),
  };

  format!("Suministro de {} {}", supplied, tail)
}

/// "Son: <words> colombianos ($.170.000.oo)/M/cte." plus the due date, if any.
pub fn totals_sentence(
  total_amount_text: &str,
  total_amount: u64,
  due_date: Option<NaiveDate>,
) -> String {
  let mut sentence = format!(
    "Son: {} colombianos ({})/M/cte.",
    total_amount_text,
    money_mcte(total_amount)
  );
  if let Some(due) = due_date_sentence(due_date) {
    sentence.push(' ');
    sentence.push_str(&due);
  }
  sentence
}

pub fn payment_terms_sentence(draft: &InvoiceDraft) -> String {
  match draft.payment_terms {
    PaymentTerms::Credit => {
      let days = draft.credit_days.map(|d| d.value()).unwrap_or(0);
      format!(
        "Condiciones de pago: Crédito a {} días calendario.- En casos excepcionales, el plazo puede extenderse hasta 10 días adicionales (máximo 30 días).",
        days
      )
    }
    PaymentTerms::Cash => "Condiciones de pago: Contado. (Pago inmediato / sin crédito).".to_string(),
  }
}

/// Lays out a complete "cuenta de cobro" page.
#[derive(Clone)]
pub struct DocumentComposer {
  issuer: IssuerProfile,
  engine: LayoutEngine,
}

impl DocumentComposer {
  pub fn new(issuer: IssuerProfile, engine: LayoutEngine) -> Self {
    Self { issuer, engine }
  }

  pub fn issuer(&self) -> &IssuerProfile {
    &self.issuer
  }

  pub fn engine(&self) -> &LayoutEngine {
    &self.engine
  }

  pub fn compose(&self, content: &InvoiceContent<'_>, canvas: &mut dyn Canvas) {
    let page = self.engine.page();
    let mut cursor = Cursor::at(page.height - 70.0);

    self.header(content, canvas, &mut cursor);
    self.issuer_block(canvas, &mut cursor);
    self.body(content, canvas, &mut cursor);
    self.closing(content, canvas, &mut cursor);
    self.footer(canvas, &mut cursor);
  }

  fn header(&self, content: &InvoiceContent<'_>, canvas: &mut dyn Canvas, cursor: &mut Cursor) {
    let engine = &self.engine;
    engine.draw_right(canvas, cursor, &self.issuer.brand, HEADING_BOLD, 75.0);
    engine.draw_right(
      canvas,
      cursor,
      &format!("CUENTA DE COBRO No.{}", content.number),
      HEADING_BOLD,
      30.0,
    );
    engine.draw_centered(
      canvas,
      cursor,
      &content.draft.client_name.value().to_uppercase(),
      TextStyle::bold(11.0),
      40.0,
    );
    engine.draw_centered(canvas, cursor, "DEBE A:", HEADING, 40.0);
  }

  fn issuer_block(&self, canvas: &mut dyn Canvas, cursor: &mut Cursor) {
    let engine = &self.engine;
    engine.draw_centered(canvas, cursor, &self.issuer.name, HEADING_BOLD, 14.0);
    engine.draw_centered(canvas, cursor, &self.issuer.rut, HEADING, 14.0);
    engine.draw_centered(canvas, cursor, &self.issuer.cc, HEADING, 30.0);
    engine.draw_centered(canvas, cursor, "POR CONCEPTO DE:", HEADING, 28.0);
  }

  fn body(&self, content: &InvoiceContent<'_>, canvas: &mut dyn Canvas, cursor: &mut Cursor) {
    let engine = &self.engine;

    engine.draw_paragraph(canvas, cursor, &concept_sentence(content.draft), BODY, BODY_LINE);
    cursor.advance(18.0);

    let totals = totals_sentence(
      content.total_amount_text,
      content.total_amount,
      content.due_date,
    );
    engine.draw_paragraph(canvas, cursor, &totals, BODY, BODY_LINE);
    cursor.advance(14.0);

    engine.draw_paragraph(
      canvas,
      cursor,
      &payment_terms_sentence(content.draft),
      BODY,
      BODY_LINE,
    );
    cursor.advance(14.0);

    for line in &self.issuer.bank_lines {
      engine.draw_paragraph(canvas, cursor, line, BODY, BODY_LINE);
    }
    cursor.advance(14.0);
  }

  fn closing(&self, content: &InvoiceContent<'_>, canvas: &mut dyn Canvas, cursor: &mut Cursor) {
    let engine = &self.engine;
    let left = engine.page().left();

    engine.draw_left(canvas, cursor, left, "Atentamente,", BODY, 30.0);
    engine.draw_centered(canvas, cursor, &self.issuer.name, SIGNATURE, 12.0);
    engine.draw_centered(canvas, cursor, &self.issuer.role, SIGNATURE, 12.0);
    engine.draw_centered(canvas, cursor, &self.issuer.brand, SIGNATURE, 30.0);

    let place_and_date = format!(
      "{}, {}.",
      self.issuer.city,
      long_date(content.draft.issue_date)
    );
    engine.draw_centered(canvas, cursor, &place_and_date, BODY, 18.0);
  }

  fn footer(&self, canvas: &mut dyn Canvas, cursor: &mut Cursor) {
    self.engine.draw_rule(canvas, cursor, 16.0);
    for line in &self.issuer.footer_lines {
      self.engine.draw_centered(canvas, cursor, line, FOOTER, 12.0);
    }
  }
}
