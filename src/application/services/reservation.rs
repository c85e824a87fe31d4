//! Reservation business logic service

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    DomainResult, Reservation, ReservationDraft, ReservationError, ReservationInput,
    ReservationListing, ReservationRepository, SnapshotStore, StoreSnapshot,
};
use crate::support::time;

/// Create/edit/cancel/list over the reservation store.
///
/// When a snapshot store is attached and `persist_on_mutation` is set, every
/// successful mutation is mirrored to it. Snapshot failures are logged and
/// never reach the caller.
pub struct ReservationService {
    repo: Arc<dyn ReservationRepository>,
    snapshot: Option<Arc<dyn SnapshotStore>>,
    persist_on_mutation: bool,
    /// Held across read-then-write so saves land in mutation order
    save_lock: Mutex<()>,
}

impl ReservationService {
    pub fn new(repo: Arc<dyn ReservationRepository>) -> Self {
        Self {
            repo,
            snapshot: None,
            persist_on_mutation: false,
            save_lock: Mutex::new(()),
        }
    }

    /// Attach a snapshot store. With `persist_on_mutation` the collection is
    /// saved after each successful create, edit or cancel.
    pub fn with_snapshot(mut self, snapshot: Arc<dyn SnapshotStore>, persist_on_mutation: bool) -> Self {
        self.snapshot = Some(snapshot);
        self.persist_on_mutation = persist_on_mutation;
        self
    }

    /// Validate and store a new reservation.
    pub async fn create(&self, input: ReservationInput, now: NaiveDateTime) -> DomainResult<Reservation> {
        let draft = ReservationDraft::parse(&input).inspect_err(|e| reject("create", e))?;

        if !time::is_future_instant(draft.instant(), now) {
            reject("create", &ReservationError::NotFuture);
            return Err(ReservationError::NotFuture);
        }

        let reservation = self.repo.insert(draft).await.inspect_err(|e| reject("create", e))?;
        info!(
            "Reservation {} created: {} on {} {} ({} guests)",
            reservation.id,
            reservation.client_name,
            reservation.date,
            reservation.time.format("%H:%M"),
            reservation.guests
        );

        self.persist_if_enabled().await;
        Ok(reservation)
    }

    /// Replace an existing reservation.
    ///
    /// A new date/time must lie in the future; an unchanged one is accepted
    /// even if it has already passed.
    pub async fn edit(&self, id: u32, input: ReservationInput, now: NaiveDateTime) -> DomainResult<Reservation> {
        let existing = self.repo.find_by_id(id).await.inspect_err(|e| reject("edit", e))?;
        let draft = ReservationDraft::parse(&input).inspect_err(|e| reject("edit", e))?;

        let new_instant = draft.instant();
        if new_instant != existing.instant() && !time::is_future_instant(new_instant, now) {
            reject("edit", &ReservationError::NotFuture);
            return Err(ReservationError::NotFuture);
        }

        let reservation = self.repo.replace(id, draft).await?;
        info!("Reservation {} updated", id);

        self.persist_if_enabled().await;
        Ok(reservation)
    }

    /// Remove a reservation. Cancelling an unknown id is not an error.
    pub async fn cancel(&self, id: u32) -> bool {
        let removed = self.repo.remove(id).await;
        if removed {
            info!("Reservation {} cancelled", id);
            self.persist_if_enabled().await;
        } else {
            debug!("Cancel ignored: reservation {} does not exist", id);
        }
        removed
    }

    /// All reservations by ascending date/time; ties keep insertion order.
    pub async fn list(&self, now: NaiveDateTime) -> ReservationListing {
        let mut reservations = self.repo.list().await;
        reservations.sort_by_key(Reservation::instant);
        ReservationListing {
            reservations,
            today: now.date(),
        }
    }

    pub async fn find(&self, id: u32) -> DomainResult<Reservation> {
        self.repo.find_by_id(id).await
    }

    pub async fn debug_dump(&self) -> StoreSnapshot {
        self.repo.snapshot().await
    }

    /// Write the current collection to the snapshot store, if one is
    /// attached. Failures are logged and also returned to the caller.
    pub async fn save_snapshot(&self) -> DomainResult<()> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };
        let _guard = self.save_lock.lock().await;
        let records = self.repo.list().await;
        snapshot
            .save(&records)
            .await
            .inspect_err(|e| warn!("Snapshot not saved, in-memory state kept: {}", e))
    }

    async fn persist_if_enabled(&self) {
        if self.persist_on_mutation {
            // already logged
            let _ = self.save_snapshot().await;
        }
    }
}

fn reject(operation: &str, err: &ReservationError) {
    info!("Reservation {} rejected: {}", operation, err);
}

// ── Tests ──────────────────────────────────────────────────────
