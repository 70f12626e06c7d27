mod manager;
mod types;
mod validation;

pub use manager::{ConfigManager, LoadedConfig};
pub use types::{Config, MountsSection, ShareEntry};
pub use validation::{ValidationReport, check_mount_point, validate_config};
