pub mod data;
pub mod io;
pub mod printing;

pub use data::{Config, ConfigKey, DEFAULT_BASE_URL};
pub use io::ConfigError;
