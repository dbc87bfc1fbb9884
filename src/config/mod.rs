mod server;

pub use server::{CONFIG_FILE_NAME, ConfigOverrides, ENVIRONMENT_VAR, FileConfig, ServerConfig};
