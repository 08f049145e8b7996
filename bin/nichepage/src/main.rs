//! Nichepage CLI
//!
//! Generates one static affiliate landing page per product niche.
//!
//! This is the binary entry point. The command implementations are in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use nichepage::cmd::build::BuildOverrides;

/// Command-line interface for Nichepage.
#[derive(Parser)]
#[command(
    name = "nichepage",
    version,
    about = "Generate affiliate landing pages for product niches"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "nichepage.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build a landing page for every niche in the niche list
    Build {
        /// CSV file listing the niches
        #[arg(short, long)]
        niches: Option<PathBuf>,
        /// Output directory (wiped before building)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Template directory
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Affiliate tag appended to product links
        #[arg(long, env = "AMAZON_ASSOC_TAG", hide_env_values = true)]
        tag: Option<String>,
        /// Product search API key
        #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Write a starter template directory and niche list
    Init {
        /// Directory to initialize
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Validate configuration, template and niche list
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    nichepage::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            niches,
            output,
            template,
            tag,
            api_key,
        } => {
            let overrides = BuildOverrides {
                niches,
                output,
                template,
                tag,
                api_key,
            };
            nichepage::cmd::build::run(&cli.config, overrides)?;
        }
        Commands::Init { dir, force } => {
            nichepage::cmd::init::run(&dir, force)?;
        }
        Commands::Check { strict } => {
            nichepage::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["nichepage", "build", "--output", "public", "--niches", "list.csv"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, PathBuf::from("nichepage.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                niches,
                output,
                template,
                ..
            } => {
                assert_eq!(niches, Some(PathBuf::from("list.csv")));
                assert_eq!(output, Some(PathBuf::from("public")));
                assert!(template.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_tag_and_key() {
        let args = [
            "nichepage",
            "build",
            "--tag",
            "shop-20",
            "--api-key",
            "secret",
            "--template",
            "themes/dark",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build {
                tag,
                api_key,
                template,
                ..
            } => {
                assert_eq!(tag.as_deref(), Some("shop-20"));
                assert_eq!(api_key.as_deref(), Some("secret"));
                assert_eq!(template, Some(PathBuf::from("themes/dark")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_init_command_parsing() {
        let cli = Cli::parse_from(["nichepage", "init", "my-sites", "--force"]);

        match cli.command {
            Commands::Init { dir, force } => {
                assert_eq!(dir, PathBuf::from("my-sites"));
                assert!(force);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_init_defaults_to_current_dir() {
        let cli = Cli::parse_from(["nichepage", "init"]);

        match cli.command {
            Commands::Init { dir, force } => {
                assert_eq!(dir, PathBuf::from("."));
                assert!(!force);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let cli = Cli::parse_from(["nichepage", "check", "--strict"]);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["nichepage", "-vv", "build"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let cli = Cli::parse_from(["nichepage", "--config", "shop.toml", "check"]);
        assert_eq!(cli.config, PathBuf::from("shop.toml"));
    }
}
