pub mod counter_store;
pub mod invoice_repository;

pub use counter_store::PostgresCounterStore;
pub use invoice_repository::PostgresInvoiceRepository;
