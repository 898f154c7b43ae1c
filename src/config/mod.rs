// Environment-driven configuration

pub mod app;

pub use app::{AnalyticsConfig, AppConfig, LlmConfig};
