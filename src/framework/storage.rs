use crate::framework::core::{
    Body, CapturedEvent, ChangeBroadcaster, ChangeStream, HttpRequest, HttpResponse, Outcome,
    StoreChange, StoreError,
};
use crate::framework::query::filter_events;
use chrono::{DateTime, Utc};
use log::debug;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Append-only, observable log of captured events.
///
/// Handles are cheap to clone and share the same log. Events are only ever
/// appended, settled in place, or dropped all at once by [`EventStore::clear`].
#[derive(Clone, Default)]
pub struct EventStore {
    events: Arc<RwLock<Vec<CapturedEvent>>>,
    changes: ChangeBroadcaster,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending event for `request` and return its id
    pub fn record_request(&self, request: HttpRequest) -> String {
        let event = CapturedEvent::pending(request);
        let id = event.id.clone();
        self.push(event);
        id
    }

    pub fn push(&self, event: CapturedEvent) {
        let id = event.id.clone();
        self.write().push(event);
        debug!("EventStore: appended event {}", id);
        self.changes.broadcast(StoreChange::Appended(id));
    }

    pub fn complete(&self, id: &str, response: HttpResponse) -> Result<(), StoreError> {
        self.complete_at(id, response, Utc::now())
    }

    pub fn complete_at(
        &self,
        id: &str,
        response: HttpResponse,
        received_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.settle(id, Outcome::Completed { response, received_at })
    }

    pub fn fail(&self, id: &str, error: impl Into<Body>) -> Result<(), StoreError> {
        self.fail_at(id, error, Utc::now())
    }

    pub fn fail_at(
        &self,
        id: &str,
        error: impl Into<Body>,
        failed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.settle(
            id,
            Outcome::Failed {
                error: error.into(),
                failed_at,
            },
        )
    }

    fn settle(&self, id: &str, outcome: Outcome) -> Result<(), StoreError> {
        {
            let mut events = self.write();
            let event = events
                .iter_mut()
                .find(|event| event.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            if !event.outcome.is_pending() {
                return Err(StoreError::AlreadySettled(id.to_string()));
            }
            event.outcome = outcome;
        }
        debug!("EventStore: settled event {}", id);
        self.changes.broadcast(StoreChange::Settled(id.to_string()));
        Ok(())
    }

    pub fn clear(&self) {
        let removed = {
            let mut events = self.write();
            let removed = events.len();
            events.clear();
            removed
        };
        debug!("EventStore: cleared {} events", removed);
        self.changes.broadcast(StoreChange::Cleared);
    }

    pub fn snapshot(&self) -> Vec<CapturedEvent> {
        self.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<CapturedEvent> {
        self.read().iter().find(|event| event.id == id).cloned()
    }

    /// Event at `index` in capture order
    pub fn nth(&self, index: usize) -> Option<CapturedEvent> {
        self.read().get(index).cloned()
    }

    /// Events whose request URL contains `search`, see [`filter_events`]
    pub fn query(&self, search: &str) -> Vec<CapturedEvent> {
        let events = self.read();
        let matched: Vec<CapturedEvent> = filter_events(events.iter(), search)
            .into_iter()
            .cloned()
            .collect();
        matched
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn subscribe(&self) -> ChangeStream {
        self.changes.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.subscriber_count()
    }

    pub fn stats(&self) -> StoreStats {
        let events = self.read();
        let mut stats = StoreStats {
            total_events: events.len(),
            oldest_timestamp: events.first().map(|e| e.timestamp),
            newest_timestamp: events.last().map(|e| e.timestamp),
            ..StoreStats::default()
        };
        for event in events.iter() {
            match event.outcome {
                Outcome::Pending => stats.pending += 1,
                Outcome::Completed { .. } => stats.completed += 1,
                Outcome::Failed { .. } => stats.failed += 1,
            }
        }
        stats
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<CapturedEvent>> {
        self.events.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<CapturedEvent>> {
        self.events.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StoreStats {
    pub total_events: usize,
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
    pub oldest_timestamp: Option<DateTime<Utc>>,
    pub newest_timestamp: Option<DateTime<Utc>>,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Captured events: {}", self.total_events)?;
        write!(
            f,
            "  pending: {}, completed: {}, failed: {}",
            self.pending, self.completed, self.failed
        )?;
        if let (Some(oldest), Some(newest)) = (self.oldest_timestamp, self.newest_timestamp) {
            write!(
                f,
                "\n  time range: {} - {} ({} ms)",
                oldest.format("%H:%M:%S%.3f"),
                newest.format("%H:%M:%S%.3f"),
                (newest - oldest).num_milliseconds()
            )?;
        }
        Ok(())
    }
}
