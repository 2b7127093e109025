//! Stored stocktake event records and the `event` subcommands.
//!
//! Events describe the count itself (customer, outlet, supervisors) and are
//! keyed by event id. The store is a single JSON file under the platform
//! config dir; a missing or corrupt file reads as an empty store.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::CliError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EventRecord {
    pub event_id: String,
    pub customer_name: String,
    pub customer_id: String,
    pub outlet_address: String,
    pub date_of_stock_count: String,
    pub time_of_stock_count: String,
    pub total_stocktake_locations: u32,
    pub audit_supervisor: String,
    pub customer_supervisor: String,
    pub company_logo: Option<String>,
}

#[derive(Debug)]
pub struct EventStore {
    path: PathBuf,
    events: Vec<EventRecord>,
}

impl EventStore {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stocktake")
            .join("events.json")
    }

    /// Open the store at `path`. Unreadable or unparseable contents read as
    /// an empty store; the next save rewrites the file.
    pub fn open(path: PathBuf) -> Self {
        let events = fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        EventStore { path, events }
    }

    pub fn all(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn get(&self, event_id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.event_id == event_id)
    }

    /// Insert or replace the record with the same event id. Persists.
    pub fn upsert(&mut self, record: EventRecord) -> Result<(), CliError> {
        match self.events.iter_mut().find(|e| e.event_id == record.event_id) {
            Some(existing) => *existing = record,
            None => self.events.push(record),
        }
        self.save()
    }

    /// Remove by event id. Persists when something was removed.
    pub fn remove(&mut self, event_id: &str) -> Result<bool, CliError> {
        let before = self.events.len();
        self.events.retain(|e| e.event_id != event_id);
        if self.events.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CliError::load(format!("{}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(&self.events)
            .map_err(|e| CliError::load(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| CliError::load(format!("{}: {}", self.path.display(), e)))
    }
}

fn open_store(store: Option<PathBuf>) -> EventStore {
    EventStore::open(store.unwrap_or_else(EventStore::default_path))
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    id: String,
    customer: Option<String>,
    customer_id: Option<String>,
    address: Option<String>,
    date: Option<String>,
    time: Option<String>,
    locations: Option<u32>,
    audit_supervisor: Option<String>,
    customer_supervisor: Option<String>,
    store: Option<PathBuf>,
) -> Result<(), CliError> {
    if id.trim().is_empty() {
        return Err(CliError::args("event id must not be blank"));
    }

    let mut store = open_store(store);

    // Start from the existing record so a partial `add` acts as an update.
    let mut record = store.get(&id).cloned().unwrap_or_else(|| EventRecord {
        event_id: id.clone(),
        ..EventRecord::default()
    });
    if let Some(v) = customer {
        record.customer_name = v;
    }
    if let Some(v) = customer_id {
        record.customer_id = v;
    }
    if let Some(v) = address {
        record.outlet_address = v;
    }
    if let Some(v) = date {
        record.date_of_stock_count = v;
    }
    if let Some(v) = time {
        record.time_of_stock_count = v;
    }
    if let Some(v) = locations {
        record.total_stocktake_locations = v;
    }
    if let Some(v) = audit_supervisor {
        record.audit_supervisor = v;
    }
    if let Some(v) = customer_supervisor {
        record.customer_supervisor = v;
    }

    store.upsert(record)?;
    Ok(())
}

pub fn cmd_list(json: bool, store: Option<PathBuf>) -> Result<(), CliError> {
    let store = open_store(store);

    if json {
        let pretty = serde_json::to_string_pretty(store.all())
            .map_err(|e| CliError::load(e.to_string()))?;
        println!("{}", pretty);
    } else {
        for event in store.all() {
            if event.customer_name.is_empty() {
                println!("{}", event.event_id);
            } else {
                println!("{}  {}", event.event_id, event.customer_name);
            }
        }
    }
    Ok(())
}

pub fn cmd_show(id: String, store: Option<PathBuf>) -> Result<(), CliError> {
    let store = open_store(store);
    let event = store
        .get(&id)
        .ok_or_else(|| CliError::args(format!("no event with id {:?}", id))
            .with_hint("`stocktake event list` shows stored ids"))?;
    let pretty =
        serde_json::to_string_pretty(event).map_err(|e| CliError::load(e.to_string()))?;
    println!("{}", pretty);
    Ok(())
}

pub fn cmd_remove(id: String, store: Option<PathBuf>) -> Result<(), CliError> {
    let mut store = open_store(store);
    if !store.remove(&id)? {
        return Err(CliError::args(format!("no event with id {:?}", id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, customer: &str) -> EventRecord {
        EventRecord {
            event_id: id.into(),
            customer_name: customer.into(),
            ..EventRecord::default()
        }
    }

    #[test]
    fn missing_file_reads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::open(dir.path().join("events.json"));
        assert!(store.all().is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = EventStore::open(path);
        assert!(store.all().is_empty());
    }

    #[test]
    fn upsert_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.json");

        let mut store = EventStore::open(path.clone());
        store.upsert(record("EV-1", "Acme")).unwrap();
        store.upsert(record("EV-2", "Globex")).unwrap();

        let reloaded = EventStore::open(path);
        assert_eq!(reloaded.all().len(), 2);
        assert_eq!(reloaded.get("EV-1").unwrap().customer_name, "Acme");
    }

    #[test]
    fn upsert_replaces_by_event_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let mut store = EventStore::open(path);
        store.upsert(record("EV-1", "Acme")).unwrap();
        store.upsert(record("EV-1", "Acme Ltd")).unwrap();

        assert_eq!(store.all().len(), 1);
        assert_eq!(store.get("EV-1").unwrap().customer_name, "Acme Ltd");
    }

    #[test]
    fn remove_reports_whether_anything_went() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let mut store = EventStore::open(path);
        store.upsert(record("EV-1", "Acme")).unwrap();

        assert!(store.remove("EV-1").unwrap());
        assert!(!store.remove("EV-1").unwrap());
        assert!(store.all().is_empty());
    }

    #[test]
    fn unknown_fields_in_store_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[{"event_id": "EV-9", "legacy_field": true}]"#,
        )
        .unwrap();
        let store = EventStore::open(path);
        assert_eq!(store.get("EV-9").unwrap().event_id, "EV-9");
    }
}
