pub mod calculator;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod sequence;
pub mod services;
pub mod value_objects;

pub use calculator::{compute_due_date, compute_total};
pub use entities::{InvoiceDraft, InvoiceLineItem, InvoiceRecord, RenderedInvoice};
pub use errors::{InvoiceError, StoreError, StorePhase};
pub use ports::{BlobStore, CounterStore, DocumentRenderer, InvoiceRepository};
pub use sequence::{INVOICE_NUMBER_COUNTER, SequenceAllocator};
pub use services::{InvoicePipeline, InvoicePipelineDependencies};
pub use value_objects::{
  BlobId, ClientName, ClientType, CreditDays, InvoiceNumber, LineItemDescription, PaymentTerms,
  Quantity, UnitLabel, ValidationError,
};
