//! JSON snapshot file
//!
//! Mirrors the reservation collection to a single pretty-printed JSON array.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{DomainResult, Reservation, SnapshotStore};

/// Snapshot stored as a JSON array at `path`.
#[derive(Debug, Clone)]
pub struct JsonSnapshotFile {
    path: PathBuf,
}

impl JsonSnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotFile {
    async fn load(&self) -> DomainResult<Vec<Reservation>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records: Vec<Reservation> = serde_json::from_str(&raw)?;
        info!(
            "Loaded {} reservations from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    async fn save(&self, records: &[Reservation]) -> DomainResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, body).await?;
        info!(
            "Saved {} reservations to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReservationDraft, ReservationError};
    use chrono::{NaiveDate, NaiveTime};

    fn record(id: u32, name: &str) -> Reservation {
        Reservation::from_draft(
            id,
            ReservationDraft {
                client_name: name.to_string(),
                date: NaiveDate::from_ymd_opt(2030, 12, 5).unwrap(),
                time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                guests: 2,
                notes: "Terraza".to_string(),
                phone: "555".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonSnapshotFile::new(dir.path().join("reservas.json"));
        assert_eq!(file.load().await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn save_creates_parent_and_load_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonSnapshotFile::new(dir.path().join("data").join("reservas.json"));
        let records = vec![record(1, "Ana"), record(5, "Bruno")];

        file.save(&records).await.unwrap();
        assert!(file.path().exists());
        assert_eq!(file.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn saved_file_uses_snapshot_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonSnapshotFile::new(dir.path().join("reservas.json"));
        file.save(&[record(1, "Ana")]).await.unwrap();

        let raw = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<&String> = value[0].as_object().unwrap().keys().collect();
        for field in ["id", "clientName", "date", "time", "guests", "notes", "phone"] {
            assert!(keys.iter().any(|k| *k == field), "missing {field}");
        }
        assert_eq!(keys.len(), 7);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_persistence_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservas.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonSnapshotFile::new(&path).load().await.unwrap_err();
        assert!(matches!(err, ReservationError::PersistenceFailure(_)));
    }

    #[tokio::test]
    async fn save_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();

        let file = JsonSnapshotFile::new(blocker.join("reservas.json"));
        let err = file.save(&[record(1, "Ana")]).await.unwrap_err();
        assert!(matches!(err, ReservationError::PersistenceFailure(_)));
    }
}
