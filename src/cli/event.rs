//! Event CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_event_list;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{DateRange, EventPatch, EventTime, ALL_DAY};
use crate::services::{CreateEventInput, EventService};
use crate::storage::Storage;

use super::parse_date;

/// Event subcommands
#[derive(Subcommand)]
pub enum EventCommands {
    /// List events, optionally within a date range
    List {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Add an event, one per day when a range is given
    Add {
        /// What the event is
        concept: String,
        /// Day of the event, or first day of the range (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
        /// Time (HH:MM), or "all day"
        #[arg(short, long, default_value = ALL_DAY)]
        time: String,
        /// Who the event is for
        #[arg(short, long)]
        who: String,
    },

    /// Edit a single event
    Edit {
        /// Position shown by `list`, or event ID
        event: String,
        /// Range filter the position refers to
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New time (HH:MM), or "all day"
        #[arg(short, long)]
        time: Option<String>,
        #[arg(short, long)]
        who: Option<String>,
        #[arg(short, long)]
        concept: Option<String>,
    },

    /// Delete a single event
    Delete {
        /// Position shown by `list`, or event ID
        event: String,
        /// Range filter the position refers to
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

/// Handle an event command
pub fn handle_event_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EventCommands,
) -> TrackerResult<()> {
    let service = EventService::new(storage, settings);

    match cmd {
        EventCommands::List { from, to } => {
            let range = parse_range(from.as_deref(), to.as_deref())?;
            print!("{}", format_event_list(&service.list(range)));
        }

        EventCommands::Add {
            concept,
            date,
            until,
            time,
            who,
        } => {
            let created = service.add(CreateEventInput {
                start: parse_date(&date)?,
                end: until.as_deref().map(parse_date).transpose()?,
                time,
                who,
                concept,
            })?;

            match created.as_slice() {
                [event] => println!("Added event: {}", event),
                events => println!("Added {} events, one per day", events.len()),
            }
        }

        EventCommands::Edit {
            event,
            from,
            to,
            date,
            time,
            who,
            concept,
        } => {
            let patch = EventPatch {
                date: date.as_deref().map(parse_date).transpose()?,
                time: time
                    .as_deref()
                    .map(EventTime::parse)
                    .transpose()
                    .map_err(|e| TrackerError::Validation(e.to_string()))?,
                who,
                concept,
            };

            let range = parse_range(from.as_deref(), to.as_deref())?;
            let updated = service.edit(range, &event, &patch)?;
            println!("Updated event: {}", updated);
        }

        EventCommands::Delete { event, from, to } => {
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let removed = service.delete(range, &event)?;
            println!("Deleted event: {}", removed);
        }
    }

    Ok(())
}

/// Build a listing range; an open end is unbounded
fn parse_range(from: Option<&str>, to: Option<&str>) -> TrackerResult<Option<DateRange>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }

    let start = from.map(parse_date).transpose()?.unwrap_or(NaiveDate::MIN);
    let end = to.map(parse_date).transpose()?.unwrap_or(NaiveDate::MAX);
    Ok(Some(DateRange::new(start, end)))
}
