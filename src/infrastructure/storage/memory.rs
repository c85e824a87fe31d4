//! In-memory reservation store

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    DomainResult, Reservation, ReservationDraft, ReservationError, ReservationRepository,
    StoreSnapshot,
};

struct State {
    reservations: Vec<Reservation>,
    next_id: u32,
}

/// Process-wide reservation collection.
///
/// A single lock guards both the records and the counter, so an insert can
/// never observe a counter that another insert already consumed.
pub struct InMemoryReservationRepository {
    state: RwLock<State>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                reservations: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Seed the store with preloaded records; the counter starts one past the
    /// highest id among them.
    ///
    /// Ids must be positive and unique, and the highest one must leave room
    /// for the counter. Otherwise the seed is rejected as a whole.
    pub fn with_records(reservations: Vec<Reservation>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(reservations.len());
        for r in &reservations {
            if r.id == 0 {
                return Err(ReservationError::PersistenceFailure(
                    "snapshot contains a reservation with id 0".to_string(),
                ));
            }
            if !seen.insert(r.id) {
                return Err(ReservationError::PersistenceFailure(format!(
                    "snapshot contains duplicate id {}",
                    r.id
                )));
            }
        }

        let highest = reservations.iter().map(|r| r.id).max().unwrap_or(0);
        let next_id = highest.checked_add(1).ok_or_else(|| {
            ReservationError::PersistenceFailure(format!(
                "snapshot id {} leaves no room for new reservations",
                highest
            ))
        })?;

        Ok(Self {
            state: RwLock::new(State {
                reservations,
                next_id,
            }),
        })
    }
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn list(&self) -> Vec<Reservation> {
        self.state.read().await.reservations.clone()
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Reservation> {
        self.state
            .read()
            .await
            .reservations
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ReservationError::NotFound(id))
    }

    async fn insert(&self, draft: ReservationDraft) -> DomainResult<Reservation> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id = id.checked_add(1).ok_or(ReservationError::IdsExhausted)?;
        let reservation = Reservation::from_draft(id, draft);
        state.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn replace(&self, id: u32, draft: ReservationDraft) -> DomainResult<Reservation> {
        let mut state = self.state.write().await;
        let slot = state
            .reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ReservationError::NotFound(id))?;
        *slot = Reservation::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn remove(&self, id: u32) -> bool {
        let mut state = self.state.write().await;
        let before = state.reservations.len();
        state.reservations.retain(|r| r.id != id);
        state.reservations.len() != before
    }

    async fn next_id(&self) -> u32 {
        self.state.read().await.next_id
    }

    async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            reservations: state.reservations.clone(),
            next_id: state.next_id,
        }
    }
}
