use anyhow::Result;

use club_calendar::cli::Command;
use club_calendar::{
    handle_colour, handle_completions, handle_feed, handle_ics, handle_import,
    handle_participant_counts, handle_serve, handle_significant, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Import { path } => handle_import(path),
        Command::Significant { club_id } => handle_significant(*club_id),
        Command::Feed { club_id, prefix, json } => handle_feed(*club_id, *prefix, *json),
        Command::ParticipantCounts { club_id } => handle_participant_counts(*club_id),
        Command::Ics { club_id, output } => handle_ics(*club_id, output.as_deref()),
        Command::Colour { event_id, club } => handle_colour(*event_id, *club),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
