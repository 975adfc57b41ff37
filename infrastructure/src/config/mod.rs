//! Configuration loading and file schema.

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigError, FileAdvisor, FileConfig, FileContextConfig, FileInvokerConfig, FileLimitsConfig,
    FilePanelConfig, FileStoreConfig,
};
pub use loader::ConfigLoader;
