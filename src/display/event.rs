//! Event display formatting

use crate::models::Event;

use super::fit;

/// Format events as a table; positions match `EventService::resolve`
pub fn format_event_list(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events found.\n".to_string();
    }

    let mut output = format!(
        "{:>3}  {:10}  {:11}  {:10}  {:30}  {}\n",
        "#", "Fecha", "Hora", "Quien", "Concepto", "ID"
    );
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for (position, event) in events.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {}  {:11}  {}  {}  {}\n",
            position,
            event.date.format("%Y-%m-%d"),
            event.time,
            fit(&event.who, 10),
            fit(&event.concept, 30),
            event.id
        ));
    }

    output
}
