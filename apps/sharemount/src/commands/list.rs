use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use sharemount_core::mount::resolve_target;
use sharemount_core::{RuntimeEnv, ShareDescriptor, ShareKind};
use std::path::Path;

/// A configured share as shown to the user. Never carries the password.
#[derive(Debug, Serialize)]
struct ListedShare {
    name: String,
    kind: ShareKind,
    host: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mount_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    has_password: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ListedShare {
    fn new(share: &ShareDescriptor, env: &RuntimeEnv) -> Self {
        let (target, error) = match resolve_target(share, env) {
            Ok(target) => (Some(target.redacted()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            name: share.name.clone(),
            kind: share.kind,
            host: share.host.clone(),
            path: share.path.clone(),
            mount_point: share.mount_point.clone(),
            target,
            username: share.username.clone(),
            has_password: share.password.is_some(),
            options: share.options.clone(),
            error,
        }
    }
}

pub fn execute(config: Option<&Path>, json: bool) -> Result<()> {
    let loaded = super::load_config(config)?;
    let env = &loaded.config.settings;
    let listed: Vec<ListedShare> = loaded
        .config
        .shares()
        .iter()
        .map(|share| ListedShare::new(share, env))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    if listed.is_empty() {
        println!("No shares configured in {}", loaded.path.display());
        return Ok(());
    }

    println!(
        "{} {}",
        "Configured shares:".bold(),
        format!("({})", loaded.path.display()).dimmed()
    );
    for share in &listed {
        println!();
        let mode = if share.mount_point.is_some() {
            "static"
        } else {
            "dynamic"
        };
        println!(
            "{} {}",
            share.name.cyan(),
            format!("[{} {mode}]", share.kind).dimmed()
        );
        println!("  Remote: {}:{}", share.host, share.path);
        match (&share.target, &share.error) {
            (Some(target), _) => println!("  Target: {target}"),
            (None, Some(error)) => println!("  Target: {}", error.red()),
            (None, None) => {}
        }
        if let Some(user) = &share.username {
            let auth = if share.has_password {
                "password set"
            } else {
                "no password"
            };
            println!("  User: {user} {}", format!("({auth})").dimmed());
        }
        if let Some(options) = &share.options {
            println!("  Options: {options}");
        }
    }

    Ok(())
}
