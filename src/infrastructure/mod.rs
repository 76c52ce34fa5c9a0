// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod dashboard_file;
pub mod error;
