use super::error::PersistError;
use super::files::{atomic_write, read_file};
use crate::domain::Marker;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The persisted shape of a marker, shared by the local store, the remote
/// store, and the snapshot export.
///
/// Sequence order in a file is NOT guaranteed sorted; consumers sort by
/// position after load (the store's restore does).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub position: f64,
    pub content: String,
}

impl MarkerRecord {
    pub fn from_markers<'a>(markers: impl Iterator<Item = &'a Marker>) -> Vec<MarkerRecord> {
        markers
            .map(|m| MarkerRecord {
                position: m.position,
                content: m.content.clone(),
            })
            .collect()
    }
}

/// Write the marker records to a local data file (atomic, pretty-printed).
///
/// An empty list is written as `[]`, not skipped, since loading it back must
/// yield an empty sequence, never an error.
pub fn save_markers<P: AsRef<Path>>(path: P, records: &[MarkerRecord]) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(records)?;
    atomic_write(path, &json)?;
    Ok(())
}

/// Load marker records from a local data file.
///
/// A missing file is an empty day, not an error.
pub fn load_markers<P: AsRef<Path>>(path: P) -> Result<Vec<MarkerRecord>, PersistError> {
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<MarkerRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

/// Write the downloadable snapshot artifact (same pretty-printed records).
pub fn write_snapshot<P: AsRef<Path>>(
    path: P,
    records: &[MarkerRecord],
) -> Result<(), PersistError> {
    save_markers(path, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn record(position: f64, content: &str) -> MarkerRecord {
        MarkerRecord {
            position,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("markers-2026-08-04.json");

        let records = vec![record(50.0, "午休"), record(25.0, "写代码 #work")];
        save_markers(&path, &records).unwrap();

        let loaded = load_markers(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("markers.json");

        let records = vec![record(10.0, "a"), record(90.0, "b")];
        save_markers(&path, &records).unwrap();

        // save(load()) then load() yields the same sequence.
        let first = load_markers(&path).unwrap();
        save_markers(&path, &first).unwrap();
        let second = load_markers(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_list_round_trips_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("markers.json");

        save_markers(&path, &[]).unwrap();
        let loaded = load_markers(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_empty_day() {
        let dir = tempdir().unwrap();
        let loaded = load_markers(dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_file_is_a_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("markers.json");
        std::fs::write(&path, "{not json").unwrap();

        match load_markers(&path) {
            Err(PersistError::Format(_)) => {}
            other => panic!("expected format error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_snapshot_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timebar_data_2026-08-04.json");

        write_snapshot(&path, &[record(25.0, "写代码 #work")]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"position\": 25.0"));
    }
}
