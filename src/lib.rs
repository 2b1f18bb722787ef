pub mod adapters;
pub mod cancellation;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod metrics;
