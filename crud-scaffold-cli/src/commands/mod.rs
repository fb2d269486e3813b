//! CLI command implementations

pub mod config;
pub mod generate;
pub mod templates;

pub use config::ConfigCommand;
pub use generate::GenerateCommand;
pub use templates::TemplatesCommand;
