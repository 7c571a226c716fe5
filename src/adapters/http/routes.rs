use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{CreateInvoiceUseCase, GetInvoicePdfUseCase, GetInvoiceUseCase};

use super::errors::ApiError;
use super::handlers::{
  create_invoice_handler, get_invoice_handler, get_invoice_pdf_handler, health_handler,
};

/// Configure invoice routes
///
/// Mounts the invoice endpoints under the provided scope
/// (e.g., /api/v1/invoices).
///
/// # Routes
///
/// - POST / - Issue an invoice from a JSON draft
/// - GET /{id} - Get the stored invoice record
/// - GET /{id}/pdf - Download the rendered document
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use cuentas::application::invoice::*;
/// # use cuentas::adapters::http::routes::configure_invoice_routes;
///
/// # async fn example(
/// #   create_use_case: Arc<CreateInvoiceUseCase>,
/// #   get_use_case: Arc<GetInvoiceUseCase>,
/// #   get_pdf_use_case: Arc<GetInvoicePdfUseCase>,
/// # ) {
/// let app = App::new().service(web::scope("/api/v1/invoices").configure(|cfg| {
///   configure_invoice_routes(cfg, create_use_case, get_use_case, get_pdf_use_case)
/// }));
/// # }
/// ```
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateInvoiceUseCase>,
  get_use_case: Arc<GetInvoiceUseCase>,
  get_pdf_use_case: Arc<GetInvoicePdfUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(get_pdf_use_case))
    .app_data(json_config())
    .route("", web::post().to(create_invoice_handler))
    .route("/{id}", web::get().to(get_invoice_handler))
    .route("/{id}/pdf", web::get().to(get_invoice_pdf_handler));
}

/// Configure the health check route
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
  cfg.route("/health", web::get().to(health_handler));
}

/// Malformed JSON bodies answer with the same error shape as other validation failures
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default()
    .limit(256 * 1024)
    .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}
