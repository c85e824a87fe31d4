//! Reservation store and snapshot interfaces

use async_trait::async_trait;

use super::model::{Reservation, ReservationDraft, StoreSnapshot};
use crate::support::errors::DomainResult;

/// Owner of the live reservation collection and the id counter.
///
/// Callers only ever receive clones; the collection itself is never handed
/// out.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// All reservations, in insertion order
    async fn list(&self) -> Vec<Reservation>;

    /// Find reservation by ID (`NotFound` if absent)
    async fn find_by_id(&self, id: u32) -> DomainResult<Reservation>;

    /// Assign the next id and append (`IdsExhausted` once the counter
    /// cannot advance)
    async fn insert(&self, draft: ReservationDraft) -> DomainResult<Reservation>;

    /// Overwrite every field except `id` (`NotFound` if absent)
    async fn replace(&self, id: u32, draft: ReservationDraft) -> DomainResult<Reservation>;

    /// Remove by ID. Returns `false` when nothing matched.
    async fn remove(&self, id: u32) -> bool;

    /// Id the next insert will receive
    async fn next_id(&self) -> u32;

    /// Collection and counter, verbatim
    async fn snapshot(&self) -> StoreSnapshot;
}

/// Flat-file mirror of the collection.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the stored records. An absent snapshot is an empty list.
    async fn load(&self) -> DomainResult<Vec<Reservation>>;

    /// Replace the stored records.
    async fn save(&self, records: &[Reservation]) -> DomainResult<()>;
}
