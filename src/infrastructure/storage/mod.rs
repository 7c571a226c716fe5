pub mod filesystem_blob_store;

pub use filesystem_blob_store::{BlobMetadata, FilesystemBlobStore};
