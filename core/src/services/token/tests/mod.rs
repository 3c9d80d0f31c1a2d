//! Token service and key store tests

pub mod fixtures;
