//! Shared types: requests, results, context values, errors and configuration.

pub mod config;
pub mod errors;
pub mod requests;
pub mod responses;
pub mod value;
