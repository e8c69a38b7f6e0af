//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// canvascal - Your course calendar, exported
#[derive(Debug, Parser)]
#[command(name = "canvascal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CANVASCAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show upcoming events grouped by day
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show recently added assignments
    New,

    /// Print the Google Calendar link for an event
    Google {
        /// Event ID
        id: String,

        /// Open the link in the default browser
        #[arg(long)]
        open: bool,

        /// Copy the link to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Export events to an .ics file
    Export {
        /// Event IDs to export (all events when omitted)
        ids: Vec<String>,

        /// Output filename inside the download directory
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_export_ids() {
        let cli = Cli::parse_from(["canvascal", "export", "1", "5", "-o", "two.ics"]);
        match cli.command {
            Command::Export { ids, output } => {
                assert_eq!(ids, vec!["1", "5"]);
                assert_eq!(output.as_deref(), Some("two.ics"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_google_flags() {
        let cli = Cli::parse_from(["canvascal", "-v", "google", "7", "--open"]);
        assert!(cli.debug);
        match cli.command {
            Command::Google { id, open, copy } => {
                assert_eq!(id, "7");
                assert!(open);
                assert!(!copy);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
