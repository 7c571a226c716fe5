pub mod composer;
pub mod issuer;
pub mod layout;
pub mod metrics;

pub use composer::{
  concept_sentence, payment_terms_sentence, totals_sentence, DocumentComposer, InvoiceContent,
};
pub use issuer::IssuerProfile;
pub use layout::{
  Canvas, Cursor, FontFace, LayoutEngine, PageGeometry, StandardFontMetrics, TextMeasurer,
  TextStyle,
};
