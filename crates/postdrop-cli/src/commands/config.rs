//! Configuration commands.

use super::config_path;
use anyhow::{Context, Result};
use colored::Colorize;
use postdrop_config::Config;

pub fn show() -> Result<()> {
    let path = config_path()?;

    println!("{}", "Current Configuration".cyan().bold());
    println!("{}", "─".repeat(50));

    if !path.exists() {
        println!(
            "{} No config file at {}, built-in defaults apply:",
            "Note:".yellow(),
            path.display()
        );
        println!("{}", Config::default_config_string());
        return Ok(());
    }

    let contents = std::fs::read_to_string(&path).context("Failed to read config file")?;
    println!("{}", contents);

    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let path = config_path()?;

    let mut config = Config::load_from(&path).context("Failed to load config")?;
    apply(&mut config, key, value)?;
    config.validate().context("Refusing to save invalid config")?;
    config.save_to(&path).context("Failed to save config")?;

    println!("{} Set {} = {}", "✓".green(), key.cyan(), value);

    Ok(())
}

/// Assign `value` to the dotted config `key`.
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["source", "url"] => config.source.url = value.to_string(),
        ["source", "timeout_seconds"] => {
            config.source.timeout_seconds = if value == "none" {
                None
            } else {
                Some(value.parse().context("Invalid timeout value")?)
            };
        }
        ["storage", "bucket"] => config.storage.bucket = value.to_string(),
        ["storage", "region"] => config.storage.region = value.to_string(),
        ["storage", "key_prefix"] => config.storage.key_prefix = value.to_string(),
        ["storage", "object_name"] => config.storage.object_name = value.to_string(),
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    }

    Ok(())
}
