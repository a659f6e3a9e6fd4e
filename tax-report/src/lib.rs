pub mod config;
pub mod logging;
pub mod render;
pub mod server;
pub mod utils;

pub use config::{ConfigError, ConfigOverrides, ReportConfig, ServerConfig};
pub use render::{ComparisonReport, OutputFormat, RenderError, render};
