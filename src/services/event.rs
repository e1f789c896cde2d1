//! Event service
//!
//! Adds calendar events (expanding date ranges into one event per day),
//! lists them by date range, and edits or deletes single events.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{DateRange, Event, EventDetails, EventPatch, EventTime};
use crate::storage::Storage;

/// Service for calendar event management
pub struct EventService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Input for adding events
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    pub start: NaiveDate,
    /// Last day, inclusive; defaults to `start`
    pub end: Option<NaiveDate>,
    /// `HH:MM` or the all-day sentinel
    pub time: String,
    pub who: String,
    pub concept: String,
}

impl<'a> EventService<'a> {
    /// Create a new event service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Add one event per day of the input range
    pub fn add(&self, input: CreateEventInput) -> TrackerResult<Vec<Event>> {
        let time = EventTime::parse(&input.time)
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        let who = self.settings.resolve_person(&input.who)?;

        let details = EventDetails::new(time, who, input.concept);
        let created = details
            .expand(input.start, input.end.unwrap_or(input.start))
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let mut events = self.storage.events.load();
        events.extend(created.iter().cloned());
        self.storage.events.save(&events)?;

        for event in &created {
            self.storage.log_create(
                EntityType::Event,
                event.id.to_string(),
                Some(event.concept.clone()),
                event,
            )?;
        }

        Ok(created)
    }

    /// List events in a range, ordered by date
    ///
    /// Events on the same day keep their stored order.
    pub fn list(&self, range: Option<DateRange>) -> Vec<Event> {
        let mut events = match range {
            Some(range) => self.storage.events.load_scope(&range),
            None => self.storage.events.load(),
        };
        events.sort_by_key(|e| e.date);
        events
    }

    /// Edit the event `reference` names within a listing
    ///
    /// A number is a 0-based position in `list(range)`; anything else is
    /// matched against event ids.
    pub fn edit(
        &self,
        range: Option<DateRange>,
        reference: &str,
        patch: &EventPatch,
    ) -> TrackerResult<Event> {
        if patch.is_empty() {
            return Err(TrackerError::Validation(
                "No changes specified. Use --date, --time, --who or --concept.".into(),
            ));
        }

        let mut patch = patch.clone();
        if let Some(who) = &patch.who {
            patch.who = Some(self.settings.resolve_person(who)?);
        }

        let mut events = self.storage.events.load();
        let index = locate(&events, range.as_ref(), reference)?;

        let before = events[index].clone();
        let mut after = before.clone();
        after.apply(&patch);
        after
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        events[index] = after.clone();

        self.storage.events.save(&events)?;
        self.storage.log_update(
            EntityType::Event,
            after.id.to_string(),
            Some(after.concept.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Delete the event `reference` names within a listing
    pub fn delete(&self, range: Option<DateRange>, reference: &str) -> TrackerResult<Event> {
        let mut events = self.storage.events.load();
        let index = locate(&events, range.as_ref(), reference)?;

        let removed = events.remove(index);
        self.storage.events.save(&events)?;
        self.storage.log_delete(
            EntityType::Event,
            removed.id.to_string(),
            Some(removed.concept.clone()),
            &removed,
        )?;

        Ok(removed)
    }
}

/// Index into `events` of the row `reference` names
///
/// Positions count over the listing order of `list`: rows inside `range`,
/// stably sorted by date.
fn locate(events: &[Event], range: Option<&DateRange>, reference: &str) -> TrackerResult<usize> {
    let reference = reference.trim();
    let mut listing: Vec<usize> = (0..events.len())
        .filter(|&i| range.map_or(true, |r| events[i].is_within(r)))
        .collect();
    listing.sort_by_key(|&i| events[i].date);

    if let Ok(position) = reference.parse::<usize>() {
        if let Some(&index) = listing.get(position) {
            return Ok(index);
        }
    }

    listing
        .into_iter()
        .find(|&i| events[i].id.matches(reference))
        .ok_or_else(|| TrackerError::event_not_found(reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::models::ALL_DAY;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    fn input(start: u32, end: Option<u32>, concept: &str) -> CreateEventInput {
        CreateEventInput {
            start: day(start),
            end: end.map(day),
            time: "all day".into(),
            who: "yo".into(),
            concept: concept.into(),
        }
    }

    #[test]
    fn test_add_single_day() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EventService::new(&storage, &settings);

        let created = service.add(input(5, None, "Dentista")).unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].time, ALL_DAY);
        assert_eq!(created[0].who, "Yo");
        assert_eq!(storage.events.load(), created);
    }

    #[test]
    fn test_add_range_expands_per_day() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EventService::new(&storage, &settings);

        let created = service.add(input(5, Some(7), "Viaje")).unwrap();
        let dates: Vec<_> = created.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(5), day(6), day(7)]);
        assert_eq!(storage.events.load().len(), 3);
    }

    #[test]
    fn test_add_rejections() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EventService::new(&storage, &settings);

        assert!(service.add(input(7, Some(5), "Viaje")).unwrap_err().is_validation());

        let mut stranger = input(5, None, "Cena");
        stranger.who = "Vecino".into();
        assert!(service.add(stranger).unwrap_err().is_validation());

        let mut bad_time = input(5, None, "Cena");
        bad_time.time = "25:99".into();
        assert!(service.add(bad_time).unwrap_err().is_validation());

        assert!(storage.events.load().is_empty());
    }

    #[test]
    fn test_list_by_range_sorted() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EventService::new(&storage, &settings);

        service.add(input(20, None, "Cumpleaños")).unwrap();
        service.add(input(3, None, "Reunión")).unwrap();
        service
            .add(CreateEventInput {
                start: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
                end: None,
                time: "10:00".into(),
                who: "Pareja".into(),
                concept: "Médico".into(),
            })
            .unwrap();

        let october = service.list(Some(DateRange::month_of(day(1))));
        let concepts: Vec<_> = october.iter().map(|e| e.concept.as_str()).collect();
        assert_eq!(concepts, vec!["Reunión", "Cumpleaños"]);
        assert_eq!(service.list(None).len(), 3);
    }

    #[test]
    fn test_edit_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EventService::new(&storage, &settings);
        service.add(input(5, Some(6), "Viaje")).unwrap();

        let edited = service
            .edit(
                None,
                "1",
                &EventPatch {
                    time: Some(EventTime::parse("08:00").unwrap()),
                    who: Some("familia".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.time, "08:00");
        assert!(!edited.all_day);
        assert_eq!(edited.who, "Familia");

        let id = edited.id.to_string();
        let removed = service.delete(None, &id).unwrap();
        assert_eq!(removed.date, day(6));
        assert_eq!(storage.events.load().len(), 1);
        assert!(service.delete(None, &id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_position_counts_within_range() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EventService::new(&storage, &settings);
        service.add(input(20, None, "Cumpleaños")).unwrap();
        service.add(input(3, None, "Reunión")).unwrap();

        let range = DateRange::new(day(10), day(31));
        let removed = service.delete(Some(range), "0").unwrap();

        assert_eq!(removed.concept, "Cumpleaños");
        assert_eq!(storage.events.load()[0].concept, "Reunión");
    }

    #[test]
    fn test_rows_without_ids_can_be_edited_and_deleted() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EventService::new(&storage, &settings);
        let row = |date: &str| {
            serde_json::json!({
                "Fecha": date,
                "Hora": ALL_DAY,
                "Quien": "Yo",
                "Concepto": "Viaje",
                "Todo_el_dia": true
            })
        };
        let rows = serde_json::json!([row("2024-10-05"), row("2024-10-06")]);
        std::fs::write(storage.events.path(), rows.to_string()).unwrap();

        // An id shown by one listing still names the row on the next call
        let listed = service.list(None)[1].id.to_string();
        let edited = service
            .edit(
                None,
                &listed,
                &EventPatch {
                    concept: Some("Vuelta".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.date, day(6));

        let removed = service.delete(None, "0").unwrap();
        assert_eq!(removed.date, day(5));

        let remaining = storage.events.load();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].concept, "Vuelta");
    }

    #[test]
    fn test_edit_rejects_empty_concept() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EventService::new(&storage, &settings);
        service.add(input(5, None, "Viaje")).unwrap();

        let err = service
            .edit(
                None,
                "0",
                &EventPatch {
                    concept: Some(" ".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.events.load()[0].concept, "Viaje");
    }
}
