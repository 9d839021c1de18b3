pub mod api;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod geo;
pub mod records;
pub mod services;
pub mod significance;
pub mod visual;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::database::DbPool;
use crate::services::calendar::{CalendarService, FeedWindow};
use crate::services::importing::ImportService;
use crate::services::server::ServerService;
use crate::visual::colour::parse_rgb;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_import(path: &Path) -> Result<()> {
    let config = AppConfig::from_env();
    ImportService::new(config).run(path)
}

pub fn handle_significant(club_id: i64) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = open_pool(&config)?;
    let events = CalendarService::new(&pool, &config).significant_events(club_id)?;

    println!("{}", format!("{} events significant to club {}", events.len(), club_id).bold());
    for event in events {
        let reasons: Vec<&str> = event.reasons.iter().map(|r| r.as_str()).collect();
        println!(
            "{:>6}  {}  {:<6} {:<13} {}  [{}]",
            event.id,
            format_date(event.start),
            event.club.acronym,
            event.event_classification.name,
            event.name,
            reasons.join(", ").dimmed()
        );
    }
    Ok(())
}

pub fn handle_feed(club_id: i64, prefix: bool, json: bool) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = open_pool(&config)?;
    let entries =
        CalendarService::new(&pool, &config).feed(club_id, prefix, FeedWindow::default())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        let (fr, fg, fb) = parse_rgb(&entry.text_color)?;
        let (br, bg, bb) = parse_rgb(&entry.color)?;
        println!(
            "{}  {}",
            format_date(entry.start),
            format!(" {} ", entry.title).truecolor(fr as u8, fg as u8, fb as u8).on_truecolor(
                br as u8,
                bg as u8,
                bb as u8
            )
        );
    }
    Ok(())
}

pub fn handle_participant_counts(club_id: i64) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = open_pool(&config)?;
    let counts = CalendarService::new(&pool, &config).participant_counts(club_id)?;

    let total: i64 = counts.iter().map(|c| c.count).sum();
    println!("{}", format!("{} participants across {} events", total, counts.len()).bold());
    for count in counts {
        println!(
            "{:>6}  {:<6} {:>5}  {}",
            count.event_id, count.club.acronym, count.count, count.name
        );
    }
    Ok(())
}

pub fn handle_ics(club_id: i64, output: Option<&Path>) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = open_pool(&config)?;
    let ics = CalendarService::new(&pool, &config).club_ics(club_id, Utc::now())?;

    match output {
        Some(path) => std::fs::write(path, ics)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{}", ics);
            Ok(())
        }
    }
}

pub fn handle_colour(event_id: i64, club_id: Option<i64>) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = open_pool(&config)?;
    let colours = CalendarService::new(&pool, &config)
        .event_colour(event_id, club_id)?
        .with_context(|| format!("Unknown event {}", event_id))?;

    println!("color: {}  text: {}", colours.color, colours.text_color);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}

fn open_pool(config: &AppConfig) -> Result<DbPool> {
    database::setup::open_calendar_db(&config.database_path)
}

fn format_date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
