pub mod app;
pub mod config;
pub mod progress;
pub mod render;

pub use app::run;
pub use config::{Cli, ConfigError, OutputTarget, Settings};
