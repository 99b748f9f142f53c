//! Initialize Postdrop.

use super::config_path;
use anyhow::{Context, Result};
use colored::Colorize;
use postdrop_config::Config;

pub fn run() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        println!("{} Postdrop is already initialized.", "Note:".yellow().bold());
        println!("  Config: {}", path.display());
        return Ok(());
    }

    println!("{}", "Initializing Postdrop...".cyan().bold());

    Config::create_default_file(&path).context("Failed to create config file")?;
    println!("  {} Created config: {}", "✓".green(), path.display());

    println!();
    println!("Next steps:");
    println!("  1. Set the bucket: {}", "postdrop config set storage.bucket <name>".cyan());
    println!("  2. Try it locally: {}", "postdrop invoke --memory".cyan());

    Ok(())
}
