pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use dtos::{CreateInvoiceRequest, ErrorResponse, HealthResponse, LineItemRequest};
pub use errors::ApiError;
pub use handlers::{
  create_invoice_handler, get_invoice_handler, get_invoice_pdf_handler, health_handler,
};
pub use routes::{configure_health_routes, configure_invoice_routes};
