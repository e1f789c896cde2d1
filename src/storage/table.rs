//! Generic tabular JSON store
//!
//! A table is a JSON array of flat objects sharing a fixed column set.
//! Expenses and events are both stored this way; the [`Record`] trait
//! supplies the schema and the scoping rule used by reconciliation.
//!
//! Rows that cannot be decoded are left out of every load but written back
//! unchanged on every save, so no save ever loses data it could not read.

use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{TrackerError, TrackerResult};

use super::file_io::{read_json_value, write_json_atomic};

/// A row type stored in a [`TableStore`]
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Stable identifier type
    type Id: Copy + Eq + fmt::Display;

    /// The slice of the table a session loads and saves
    type Scope: fmt::Debug + ?Sized;

    /// Entity name used in messages
    const ENTITY: &'static str;

    /// Every column a row is expected to carry on disk
    const COLUMNS: &'static [&'static str];

    /// Column holding the row's id
    const ID_COLUMN: &'static str;

    fn id(&self) -> Self::Id;

    fn in_scope(&self, scope: &Self::Scope) -> bool;
}

/// JSON file holding every row of one record type
#[derive(Debug, Clone)]
pub struct TableStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

/// The table as found on disk
struct Snapshot<R> {
    rows: Vec<R>,
    /// Rows that did not decode, kept verbatim
    unreadable: Vec<Value>,
    /// The file has content but is not a JSON array
    malformed: bool,
}

impl<R: Record> TableStore<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole table
    ///
    /// Never fails: missing, empty or malformed files load as an empty
    /// table, and rows that do not decode are skipped. Columns absent from
    /// older files are backfilled with `null` before decoding.
    pub fn load(&self) -> Vec<R> {
        self.read().rows
    }

    /// Replace the whole table on disk
    ///
    /// Rows of the current file that do not decode are appended unchanged.
    pub fn save(&self, rows: &[R]) -> TrackerResult<()> {
        let snapshot = self.read();
        self.write(rows, snapshot)
    }

    /// Load the rows belonging to a scope
    pub fn load_scope(&self, scope: &R::Scope) -> Vec<R> {
        self.load()
            .into_iter()
            .filter(|row| row.in_scope(scope))
            .collect()
    }

    /// Persist a scope's rows, keeping every other row on disk
    ///
    /// The table is re-read from disk first so rows outside the scope
    /// reflect the latest saved state. Returns the decoded table as written.
    pub fn save_scope(&self, scope: &R::Scope, subset: &[R]) -> TrackerResult<Vec<R>> {
        let mut snapshot = self.read();
        let merged = reconcile(std::mem::take(&mut snapshot.rows), scope, subset);
        debug!(
            "Reconciled {} {} rows for {:?} into {} total",
            subset.len(),
            R::ENTITY,
            scope,
            merged.len()
        );
        self.write(&merged, snapshot)?;
        Ok(merged)
    }

    fn read(&self) -> Snapshot<R> {
        let mut snapshot = Snapshot {
            rows: Vec::new(),
            unreadable: Vec::new(),
            malformed: false,
        };

        let raw_rows = match read_json_value(&self.path) {
            Some(Value::Array(rows)) => rows,
            Some(_) => {
                warn!(
                    "{} is not a JSON array of {} rows; treating as empty",
                    self.path.display(),
                    R::ENTITY
                );
                snapshot.malformed = true;
                return snapshot;
            }
            None => {
                snapshot.malformed = has_content(&self.path);
                return snapshot;
            }
        };

        for (index, raw) in raw_rows.into_iter().enumerate() {
            let mut row = raw.clone();
            backfill_columns(&mut row, R::COLUMNS);
            assign_missing_id(&mut row, R::ID_COLUMN, R::ENTITY, index);

            match serde_json::from_value::<R>(row) {
                Ok(row) => snapshot.rows.push(row),
                Err(e) => {
                    warn!(
                        "Skipping {} row {} in {}: {}",
                        R::ENTITY,
                        index,
                        self.path.display(),
                        e
                    );
                    snapshot.unreadable.push(raw);
                }
            }
        }

        debug!(
            "Loaded {} {} rows ({} unreadable)",
            snapshot.rows.len(),
            R::ENTITY,
            snapshot.unreadable.len()
        );
        snapshot
    }

    fn write(&self, rows: &[R], snapshot: Snapshot<R>) -> TrackerResult<()> {
        if snapshot.malformed {
            self.set_aside()?;
        }

        if snapshot.unreadable.is_empty() {
            write_json_atomic(&self.path, rows)?;
        } else {
            let mut values = rows
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?;
            values.extend(snapshot.unreadable);
            write_json_atomic(&self.path, &values)?;
        }

        debug!("Saved {} {} rows", rows.len(), R::ENTITY);
        Ok(())
    }

    /// Move an unreadable file out of the way before it is replaced
    fn set_aside(&self) -> TrackerResult<()> {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let aside = self.path.with_extension(format!("json.unreadable-{}", stamp));
        fs::rename(&self.path, &aside).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to move unreadable {} aside: {}",
                self.path.display(),
                e
            ))
        })?;
        warn!(
            "Moved unreadable {} to {}",
            self.path.display(),
            aside.display()
        );
        Ok(())
    }
}

/// Merge an edited scope back into the full table
///
/// The result is every row outside the scope, in its original order,
/// followed by `subset`. Rows outside the scope that share an id with a
/// row of `subset` are dropped so a record is never written twice.
pub fn reconcile<R: Record>(full: Vec<R>, scope: &R::Scope, subset: &[R]) -> Vec<R> {
    let mut merged: Vec<R> = full
        .into_iter()
        .filter(|row| !row.in_scope(scope))
        .filter(|row| !subset.iter().any(|s| s.id() == row.id()))
        .collect();
    merged.extend_from_slice(subset);
    merged
}

fn has_content(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|contents| !contents.trim().is_empty())
        .unwrap_or(false)
}

fn backfill_columns(row: &mut Value, columns: &[&str]) {
    if let Value::Object(map) = row {
        for column in columns {
            map.entry(column.to_string()).or_insert(Value::Null);
        }
    }
}

/// Give a row written before ids existed an id derived from its position
/// and content, so every load of an unchanged file agrees on it
fn assign_missing_id(row: &mut Value, id_column: &str, entity: &str, index: usize) {
    let Value::Object(map) = row else {
        return;
    };
    if !map.get(id_column).map_or(true, Value::is_null) {
        return;
    }

    let name = format!("{}:{}:{}", entity, index, Value::Object(map.clone()));
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
    map.insert(id_column.to_string(), Value::String(id.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        group: String,
        note: Option<String>,
    }

    impl Record for Row {
        type Id = u32;
        type Scope = str;
        const ENTITY: &'static str = "Row";
        const COLUMNS: &'static [&'static str] = &["id", "group", "note"];
        const ID_COLUMN: &'static str = "id";

        fn id(&self) -> u32 {
            self.id
        }

        fn in_scope(&self, scope: &str) -> bool {
            self.group == scope
        }
    }

    fn row(id: u32, group: &str) -> Row {
        Row {
            id,
            group: group.into(),
            note: None,
        }
    }

    fn create_test_store() -> (TempDir, TableStore<Row>) {
        let temp_dir = TempDir::new().unwrap();
        let store = TableStore::new(temp_dir.path().join("rows.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_load_missing_is_empty() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_non_array_is_empty() {
        let (_temp_dir, store) = create_test_store();
        std::fs::write(store.path(), r#"{"id": 1}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_backfills_missing_columns() {
        let (_temp_dir, store) = create_test_store();
        std::fs::write(store.path(), json!([{"id": 1, "group": "a"}]).to_string()).unwrap();

        let rows = store.load();
        assert_eq!(rows, vec![row(1, "a")]);
    }

    #[test]
    fn test_round_trip() {
        let (_temp_dir, store) = create_test_store();
        let mut rows = vec![row(1, "a"), row(2, "b")];
        rows[1].note = Some("hola".into());

        store.save(&rows).unwrap();
        assert_eq!(store.load(), rows);
    }

    #[test]
    fn test_reconcile_keeps_other_scopes() {
        let full = vec![row(1, "a"), row(2, "b"), row(3, "a"), row(4, "b")];
        let mut edited = row(3, "a");
        edited.note = Some("edited".into());

        let merged = reconcile(full, "a", &[edited.clone()]);

        assert_eq!(merged, vec![row(2, "b"), row(4, "b"), edited]);
    }

    #[test]
    fn test_reconcile_never_duplicates_moved_rows() {
        let full = vec![row(1, "a"), row(2, "b")];
        // Row 2 was moved into scope "a" during the session
        let merged = reconcile(full, "a", &[row(1, "a"), row(2, "a")]);
        assert_eq!(merged, vec![row(1, "a"), row(2, "a")]);
    }

    #[test]
    fn test_save_scope_keeps_rows_that_do_not_decode() {
        let (_temp_dir, store) = create_test_store();
        let raw = json!([
            {"id": 1, "group": "a", "note": null},
            {"id": 2, "group": "b", "note": null},
            {"id": "two", "group": "b", "note": null}
        ]);
        std::fs::write(store.path(), raw.to_string()).unwrap();

        assert_eq!(store.load(), vec![row(1, "a"), row(2, "b")]);

        store.save_scope("a", &[row(1, "a"), row(5, "a")]).unwrap();

        let on_disk: Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let on_disk = on_disk.as_array().unwrap();
        assert_eq!(on_disk.len(), 4);
        assert_eq!(on_disk[3], raw[2]);
        assert_eq!(store.load(), vec![row(2, "b"), row(1, "a"), row(5, "a")]);
    }

    #[test]
    fn test_save_sets_aside_unreadable_file() {
        let (temp_dir, store) = create_test_store();
        std::fs::write(store.path(), "[{\"id\": 1,").unwrap();
        assert!(store.load().is_empty());

        store.save(&[row(1, "a")]).unwrap();

        assert_eq!(store.load(), vec![row(1, "a")]);
        let aside: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.starts_with("rows.json.unreadable-"))
            .collect();
        assert_eq!(aside.len(), 1);
        let kept = std::fs::read_to_string(temp_dir.path().join(&aside[0])).unwrap();
        assert_eq!(kept, "[{\"id\": 1,");
    }

    #[test]
    fn test_save_scope_rereads_disk() {
        let (_temp_dir, store) = create_test_store();
        store.save(&[row(1, "a"), row(2, "b")]).unwrap();

        // Session opens scope "a"
        let session = store.load_scope("a");

        // Another writer adds a row to scope "b"
        let mut latest = store.load();
        latest.push(row(3, "b"));
        store.save(&latest).unwrap();

        let written = store.save_scope("a", &session).unwrap();
        assert_eq!(written, vec![row(2, "b"), row(3, "b"), row(1, "a")]);
        assert_eq!(store.load(), written);
    }
}
