//! Event table schema
//!
//! Events are stored in `eventos.json` and scoped by date range.

use crate::models::{DateRange, Event, EventId};

use super::table::{Record, TableStore};

/// Store for the event table
pub type EventStore = TableStore<Event>;

impl Record for Event {
    type Id = EventId;
    type Scope = DateRange;

    const ENTITY: &'static str = "Event";
    const COLUMNS: &'static [&'static str] =
        &["Id", "Fecha", "Hora", "Quien", "Concepto", "Todo_el_dia"];
    const ID_COLUMN: &'static str = "Id";

    fn id(&self) -> EventId {
        self.id
    }

    fn in_scope(&self, scope: &DateRange) -> bool {
        self.is_within(scope)
    }
}
