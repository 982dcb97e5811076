//! strive CLI - runs the Strive API server
//!
//! - `serve`: connect to MongoDB and serve the HTTP API
//! - `settings`: print the resolved configuration

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "strive",
    author,
    version,
    about = "Backend API for Strive workout tracking"
)]
struct Cli {
    /// Force debug logging regardless of the DEBUG setting
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Print resolved settings (credentials masked)
    Settings(commands::settings::SettingsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, cli.debug).await?,
        Commands::Settings(args) => commands::run_settings(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["strive", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.port(), 8000);
        assert_eq!(args.env_file, std::path::PathBuf::from(".env"));
        assert_eq!(args.connect_timeout, 10);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["strive", "serve", "--operation-timeout", "0"]).is_err());
    }
}
