pub mod memory;
pub mod postgres;
pub mod redis_counter_store;

pub use memory::{InMemoryBlobStore, InMemoryCounterStore, InMemoryInvoiceRepository};
pub use redis_counter_store::RedisCounterStore;
