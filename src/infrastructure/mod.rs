pub mod config;
pub mod factory;
pub mod pdf;
pub mod persistence;
pub mod storage;
