//! Demo HTTP service for exercising an ELK log-shipping pipeline.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::StructuredLogger;
