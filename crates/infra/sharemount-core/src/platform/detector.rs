use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use super::env::RuntimeEnv;

/// Whether an external program is reachable on `PATH`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub program: String,
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformInfo {
    pub os: String,
    pub arch: String,
    pub tools: Vec<ToolStatus>,
}

impl PlatformInfo {
    /// Programs that could not be found
    pub fn missing_tools(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter(|t| !t.found())
            .map(|t| t.program.as_str())
            .collect()
    }

    pub fn can_mount(&self) -> bool {
        self.tools.iter().all(ToolStatus::found)
    }
}

pub fn detect_platform(env: &RuntimeEnv) -> PlatformInfo {
    debug!("Starting platform detection");

    let tools = env
        .required_programs()
        .into_iter()
        .map(|program| {
            let path = which::which(program).ok();
            match &path {
                Some(p) => info!("Found {} at {}", program, p.display()),
                None => info!("{} not found", program),
            }
            ToolStatus {
                program: program.to_string(),
                path,
            }
        })
        .collect();

    PlatformInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        tools,
    }
}
