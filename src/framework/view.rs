use crate::framework::core::CapturedEvent;
use crate::framework::render::{curl_for_event, format_elapsed, status_label, EventDetail};
use crate::framework::storage::EventStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// One line of the event list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRow {
    pub id: String,
    pub method: String,
    pub uri: String,
    pub status: String,
    pub age: String,
}

impl LogRow {
    pub fn from_event(event: &CapturedEvent, now: Option<DateTime<Utc>>) -> Self {
        let (method, uri) = match &event.request {
            Some(request) => (request.method.clone(), request.uri.clone()),
            None => ("-".to_string(), "-".to_string()),
        };
        Self {
            id: event.id.clone(),
            method,
            uri,
            status: status_label(&event.outcome),
            age: format_elapsed(event.timestamp, now),
        }
    }
}

impl fmt::Display for LogRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<7} {:<16} {:>5}  {}",
            self.method, self.status, self.age, self.uri
        )
    }
}

/// Search state over a store, producing what a list screen shows
#[derive(Clone)]
pub struct LogView {
    store: EventStore,
    search: String,
}

impl LogView {
    pub fn new(store: EventStore) -> Self {
        Self {
            store,
            search: String::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Visible events, recomputed from the current snapshot on every call
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.store.query(&self.search)
    }

    pub fn rows(&self, now: Option<DateTime<Utc>>) -> Vec<LogRow> {
        let now = now.unwrap_or_else(Utc::now);
        self.events()
            .iter()
            .map(|event| LogRow::from_event(event, Some(now)))
            .collect()
    }

    pub fn detail(&self, id: &str, now: Option<DateTime<Utc>>) -> Option<EventDetail> {
        self.store
            .get(id)
            .map(|event| EventDetail::from_event(&event, now))
    }

    pub fn curl(&self, id: &str) -> Option<String> {
        self.store.get(id).as_ref().and_then(curl_for_event)
    }
}
