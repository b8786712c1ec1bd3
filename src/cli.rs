use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cropwise", version, about = "Crop recommendation advisor TUI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the data directory (log file location)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Run one recommendation and print it
    Recommend {
        /// Soil type (Loamy, Clay, Sandy, Black, Red, Alluvial)
        #[arg(long)]
        soil: String,

        /// Season (Summer, Monsoon, Winter, Spring)
        #[arg(long)]
        season: String,

        /// Temperature in °C; selects the extended form
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<String>,

        /// Rainfall in mm; selects the extended form
        #[arg(long)]
        rainfall: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recommend() {
        let cli = Cli::try_parse_from([
            "cropwise",
            "-vv",
            "recommend",
            "--soil",
            "Clay",
            "--season",
            "Monsoon",
            "--temperature",
            "-2",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Recommend {
                soil,
                season,
                temperature,
                rainfall,
            }) => {
                assert_eq!(soil, "Clay");
                assert_eq!(season, "Monsoon");
                assert_eq!(temperature.as_deref(), Some("-2"));
                assert!(rainfall.is_none());
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn no_command_runs_tui() {
        let cli = Cli::try_parse_from(["cropwise", "-c", "my.yaml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("my.yaml")));
    }
}
