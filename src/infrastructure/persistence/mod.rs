//! Snapshot persistence

mod snapshot;

pub use snapshot::JsonSnapshotFile;
