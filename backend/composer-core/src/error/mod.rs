pub mod composer_api;
pub mod config;
pub mod tool;

pub use composer_api::ComposerApiError;
pub use config::ConfigError;
pub use tool::ToolError;
