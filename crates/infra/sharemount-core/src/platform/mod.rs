mod constants;
pub mod detector;
mod env;
mod owner;

pub use constants::*;
pub use detector::{PlatformInfo, ToolStatus, detect_platform};
pub use env::{MatchMode, RuntimeEnv};
pub use owner::Owner;
