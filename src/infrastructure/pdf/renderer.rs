use crate::domain::document::{DocumentComposer, InvoiceContent};
use crate::domain::invoice::{DocumentRenderer, InvoiceError};

use super::writer::PdfCanvas;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Renders composed invoices as single-page PDF files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl PdfRenderer {
  pub fn new() -> Self {
    Self
  }
}

impl DocumentRenderer for PdfRenderer {
  fn content_type(&self) -> &'static str {
    PDF_CONTENT_TYPE
  }

  fn render(
    &self,
    composer: &DocumentComposer,
    content: &InvoiceContent<'_>,
  ) -> Result<Vec<u8>, InvoiceError> {
    let mut canvas = PdfCanvas::new(*composer.engine().page());
    composer.compose(content, &mut canvas);
    let bytes = canvas.finish().map_err(|e| render_failed(content, e))?;
    tracing::debug!(
      invoice_number = content.number.value(),
      size = bytes.len(),
      "Rendered PDF"
    );
    Ok(bytes)
  }
}

fn render_failed(content: &InvoiceContent<'_>, e: lopdf::Error) -> InvoiceError {
  tracing::error!(
    invoice_number = content.number.value(),
    error = %e,
    "PDF serialization failed"
  );
  InvoiceError::RenderFailed(e.to_string())
}
