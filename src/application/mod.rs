//! Application layer
//!
//! Use cases that turn transport-level commands into domain values and drive
//! the invoice pipeline.

pub mod invoice;
