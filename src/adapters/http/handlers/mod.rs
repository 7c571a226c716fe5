pub mod health;
pub mod invoices;

pub use health::health_handler;
pub use invoices::{create_invoice_handler, get_invoice_handler, get_invoice_pdf_handler};
