//! Show resolved settings

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use strive_server::Settings;

#[derive(Parser, Debug)]
pub struct SettingsArgs {
    /// Local override file; process environment wins over its values
    #[arg(long, value_name = "PATH", default_value = strive_server::config::DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,
}

/// Print settings as the server would see them, credentials masked
pub fn run_settings(args: SettingsArgs) -> Result<()> {
    let settings = Settings::load(&args.env_file)
        .with_context(|| format!("Failed to load settings (env file: {})", args.env_file.display()))?;
    println!("{}", settings);
    Ok(())
}
