use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Club calendar significance and distance engine")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the calendar API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Replace the database with a JSON record export
    Import {
        /// Path to the records file
        path: PathBuf,
    },
    /// List events significant to a club, with the rules that matched
    Significant {
        club_id: i64,
    },
    /// Print a club's calendar feed
    Feed {
        club_id: i64,
        /// Prefix titles with the organizing club's acronym
        #[arg(long)]
        prefix: bool,
        /// Print raw JSON instead of coloured lines
        #[arg(long)]
        json: bool,
    },
    /// Participants per event for a club and every club below it
    #[command(name = "participant-counts")]
    ParticipantCounts {
        club_id: i64,
    },
    /// Print a club's iCalendar file
    Ics {
        club_id: i64,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show an event's display colours
    Colour {
        event_id: i64,
        /// Viewing club; distance-based colouring when set
        #[arg(long)]
        club: Option<i64>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
