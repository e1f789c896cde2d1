//! Calendar event model
//!
//! Events are single-day records. A submission covering a date range is
//! expanded into one event per day, both endpoints included.

use chrono::{Datelike, Months, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::EventId;
use super::wire;

/// Value stored in the time column for all-day events
pub const ALL_DAY: &str = "Todo el día";

/// A single calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "Id", default, deserialize_with = "wire::null_as_default")]
    pub id: EventId,

    #[serde(rename = "Fecha", deserialize_with = "wire::date")]
    pub date: NaiveDate,

    /// `HH:MM`, or [`ALL_DAY`]
    #[serde(rename = "Hora", default, deserialize_with = "wire::null_as_default")]
    pub time: String,

    /// Who the event is for
    #[serde(rename = "Quien", default, deserialize_with = "wire::null_as_default")]
    pub who: String,

    #[serde(rename = "Concepto", default, deserialize_with = "wire::null_as_default")]
    pub concept: String,

    #[serde(rename = "Todo_el_dia", default, deserialize_with = "wire::null_as_default")]
    pub all_day: bool,
}

impl Event {
    /// Check whether the event falls inside a date range
    pub fn is_within(&self, range: &DateRange) -> bool {
        range.contains(self.date)
    }

    /// Apply an edit in place
    pub fn apply(&mut self, patch: &EventPatch) {
        if let Some(concept) = &patch.concept {
            self.concept = concept.trim().to_string();
        }
        if let Some(who) = &patch.who {
            self.who = who.clone();
        }
        if let Some(time) = &patch.time {
            self.all_day = time.is_all_day();
            self.time = time.to_string();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.concept.trim().is_empty() {
            return Err(EventValidationError::EmptyConcept);
        }
        if self.who.trim().is_empty() {
            return Err(EventValidationError::EmptyWho);
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.time,
            self.concept,
            self.who
        )
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Time of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    AllDay,
    At(NaiveTime),
}

impl EventTime {
    /// Parse user input: `HH:MM`, or the all-day sentinel in Spanish or English
    pub fn parse(input: &str) -> Result<Self, EventValidationError> {
        let trimmed = input.trim();
        let lowered = trimmed.to_lowercase();
        if lowered == ALL_DAY.to_lowercase() || lowered == "all day" || lowered == "all-day" {
            return Ok(Self::AllDay);
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self::At)
            .map_err(|_| EventValidationError::InvalidTime(trimmed.to_string()))
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllDay => write!(f, "{}", ALL_DAY),
            Self::At(time) => write!(f, "{}", time.format("%H:%M")),
        }
    }
}

/// The attributes shared by every day of an event submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub time: EventTime,
    pub who: String,
    pub concept: String,
}

impl EventDetails {
    pub fn new(time: EventTime, who: impl Into<String>, concept: impl Into<String>) -> Self {
        Self {
            time,
            who: who.into(),
            concept: concept.into(),
        }
    }

    /// Build the event for a single day
    pub fn on(&self, date: NaiveDate) -> Event {
        Event {
            id: EventId::new(),
            date,
            time: self.time.to_string(),
            who: self.who.clone(),
            concept: self.concept.trim().to_string(),
            all_day: self.time.is_all_day(),
        }
    }

    /// Expand into one event per day of `start..=end`
    ///
    /// Every event carries the same details; only the date and id differ.
    pub fn expand(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, EventValidationError> {
        if end < start {
            return Err(EventValidationError::InvertedRange { start, end });
        }

        let events: Vec<Event> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| self.on(day))
            .collect();

        if let Some(first) = events.first() {
            first.validate()?;
        }

        Ok(events)
    }
}

/// Replacement values for an event edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub date: Option<NaiveDate>,
    pub time: Option<EventTime>,
    pub who: Option<String>,
    pub concept: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.who.is_none() && self.concept.is_none()
    }
}

/// Validation errors for events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyConcept,
    EmptyWho,
    InvalidTime(String),
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyConcept => write!(f, "Event concept cannot be empty"),
            Self::EmptyWho => write!(f, "Event must be assigned to someone"),
            Self::InvalidTime(input) => {
                write!(f, "Invalid time '{}': use HH:MM or '{}'", input, ALL_DAY)
            }
            Self::InvertedRange { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for EventValidationError {}
