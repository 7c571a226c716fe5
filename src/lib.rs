//! Sequential "cuenta de cobro" issuing service.
//!
//! Allocates invoice numbers from a durable counter, renders a single-page
//! Spanish billing document and stores it with its metadata.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
