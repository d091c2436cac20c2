use clap::{Parser, Subcommand};
use peer_settings::PeerKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "peerform")]
#[command(about = "Build and inspect peer connection configs for replication mirrors", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the fields of a peer kind's settings form
    Schema {
        /// Peer kind (postgres or ssh)
        kind: PeerKind,

        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the blank config for a peer kind
    Blank {
        kind: PeerKind,

        /// Write the config to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Apply field edits to a config
    Set {
        kind: PeerKind,

        /// Edit, as LABEL=VALUE or KEY=VALUE; applied in order
        #[arg(short = 'f', long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Start from this config instead of the blank one
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show a config field by field
    Show {
        kind: PeerKind,

        /// Config file to show
        input: PathBuf,

        /// Print secrets in clear text
        #[arg(long)]
        reveal: bool,
    },
    /// Fill in a config interactively
    Edit {
        kind: PeerKind,

        /// Start from this config instead of the blank one
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the submitted config (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the connection URL of a Postgres config
    ConnString {
        /// Postgres config file
        input: PathBuf,
    },
    /// Format a duration given in seconds
    Duration {
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },
    /// Show how a replication slot name is displayed
    Slot {
        slot_name: String,

        /// Open the mirror edit page in the browser when the slot is linked
        #[arg(long)]
        open: bool,
    },
    /// Print the app config, or write it out with --init
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        init: bool,
    },
    /// Show slot or session activity exported from a peer
    Activity {
        #[command(subcommand)]
        command: ActivityCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ActivityCommand {
    /// Replication slots, linked to their mirrors
    Slots {
        /// JSON file with slot rows
        file: PathBuf,
    },
    /// Active sessions with their running time
    Stats {
        /// JSON file with session rows
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_with_fields() {
        let cli = Cli::try_parse_from([
            "peerform", "set", "postgres", "-f", "Host=db", "--field", "port=6543",
        ])
        .unwrap();
        match cli.command {
            Commands::Set { kind, fields, .. } => {
                assert_eq!(kind, PeerKind::Postgres);
                assert_eq!(fields, vec!["Host=db", "port=6543"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_duration() {
        let cli = Cli::try_parse_from(["peerform", "duration", "-1"]).unwrap();
        match cli.command {
            Commands::Duration { seconds } => assert_eq!(seconds, -1.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["peerform", "blank", "mysql"]).is_err());
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["peerform", "config", "--init"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { init: true }));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
