mod config;
mod logging;

pub use config::{apply_env_overrides, load_config, parse_config};
pub use logging::{level_from_str, setup_logging};
