pub mod create_invoice;
pub mod get_invoice;
pub mod get_invoice_pdf;

pub use create_invoice::{
  CreateInvoiceCommand, CreateInvoiceLineItemDto, CreateInvoiceResponse, CreateInvoiceUseCase,
};
pub use get_invoice::{
  GetInvoiceCommand, GetInvoiceUseCase, InvoiceDetailsResponse, InvoiceLineItemDto,
};
pub use get_invoice_pdf::{GetInvoicePdfCommand, GetInvoicePdfUseCase, InvoicePdfResponse};
