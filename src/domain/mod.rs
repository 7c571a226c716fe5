pub mod document;
pub mod invoice;
pub mod localization;
