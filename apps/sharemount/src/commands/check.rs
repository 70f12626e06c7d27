use anyhow::Result;
use colored::Colorize;
use sharemount_core::detect_platform;
use std::path::Path;

pub fn execute(config: Option<&Path>) -> Result<()> {
    let loaded = super::load_config(config)?;
    let shares = loaded.config.shares();

    println!(
        "{} Configuration {} is valid ({} share(s))",
        "✓".green(),
        loaded.path.display(),
        shares.len()
    );
    if !loaded.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &loaded.warnings {
            println!("  - {}", warning.yellow());
        }
    }

    let settings = &loaded.config.settings;
    println!("\nVolumes root: {}", settings.volumes_root.display());
    if !settings.volumes_root.is_dir() {
        println!("  {} does not exist yet", "!".yellow());
    }

    let platform = detect_platform(settings);
    println!("\nPlatform: {} ({})", platform.os, platform.arch);
    println!("Required programs:");
    for tool in &platform.tools {
        match &tool.path {
            Some(path) => println!("  {} {} ({})", "✓".green(), tool.program, path.display()),
            None => println!("  {} {} {}", "✗".red(), tool.program, "not found".red()),
        }
    }

    if platform.can_mount() {
        println!("\n{}", "Ready to mount".green());
    } else {
        println!(
            "\n{} missing: {}",
            "Not ready to mount,".yellow(),
            platform.missing_tools().join(", ")
        );
    }

    Ok(())
}
