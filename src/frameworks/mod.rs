// Frameworks: configuration and process bootstrap.

pub mod app;
pub mod config;
