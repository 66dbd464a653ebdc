use super::{CaptureMessage, CaptureStream};
use crate::framework::core::{CapturedEvent, StoreError};
use crate::framework::storage::EventStore;
use futures::stream::StreamExt;
use log::{debug, warn};

/// Counts of what a recorder did with a capture stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub requests: usize,
    pub responses: usize,
    pub failures: usize,
    pub skipped: usize,
}

/// Applies capture messages to a store, acting as its single writer
pub struct CaptureRecorder {
    store: EventStore,
}

impl CaptureRecorder {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Drain `stream` into the store. Messages that cannot be applied are
    /// logged and skipped rather than ending the recording.
    pub async fn record(&self, mut stream: CaptureStream) -> RecordSummary {
        let mut summary = RecordSummary::default();
        while let Some(message) = stream.next().await {
            debug!("CaptureRecorder: applying message for {}", message.id());
            match self.apply(message) {
                Ok(Applied::Request) => summary.requests += 1,
                Ok(Applied::Response) => summary.responses += 1,
                Ok(Applied::Failure) => summary.failures += 1,
                Err(e) => {
                    warn!("CaptureRecorder: skipping message: {}", e);
                    summary.skipped += 1;
                }
            }
        }
        summary
    }

    fn apply(&self, message: CaptureMessage) -> Result<Applied, StoreError> {
        match message {
            CaptureMessage::Request { id, request, at } => {
                self.store
                    .push(CapturedEvent::new_with_id_and_timestamp(id, at, Some(request)));
                Ok(Applied::Request)
            }
            CaptureMessage::Response { id, response, at } => {
                self.store.complete_at(&id, response, at)?;
                Ok(Applied::Response)
            }
            CaptureMessage::Failure { id, error, at } => {
                self.store.fail_at(&id, error, at)?;
                Ok(Applied::Failure)
            }
        }
    }
}

enum Applied {
    Request,
    Response,
    Failure,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::core::{HttpRequest, HttpResponse};
    use chrono::Utc;
    use futures::stream;

    fn request(id: &str) -> CaptureMessage {
        CaptureMessage::Request {
            id: id.to_string(),
            request: HttpRequest::new("GET", format!("https://example.com/{}", id)),
            at: Utc::now(),
        }
    }

    fn response(id: &str, status: u16) -> CaptureMessage {
        CaptureMessage::Response {
            id: id.to_string(),
            response: HttpResponse::new(status, "OK"),
            at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_recorder_applies_messages_in_order() {
        let store = EventStore::new();
        let recorder = CaptureRecorder::new(store.clone());
        let messages = vec![
            request("a"),
            request("b"),
            response("a", 200),
            CaptureMessage::Failure {
                id: "b".to_string(),
                error: "reset".into(),
                at: Utc::now(),
            },
        ];

        let summary = recorder.record(Box::pin(stream::iter(messages))).await;
        assert_eq!(
            summary,
            RecordSummary { requests: 2, responses: 1, failures: 1, skipped: 0 }
        );

        let events = store.snapshot();
        assert_eq!(events[0].id, "a");
        assert_eq!(events[0].response().unwrap().status_code, 200);
        assert_eq!(events[1].id, "b");
        assert!(events[1].error().is_some());
    }

    #[tokio::test]
    async fn test_recorder_skips_unmatched_and_duplicate_settlements() {
        let store = EventStore::new();
        let recorder = CaptureRecorder::new(store.clone());
        let messages = vec![
            response("ghost", 200),
            request("a"),
            response("a", 200),
            response("a", 500),
        ];

        let summary = recorder.record(Box::pin(stream::iter(messages))).await;
        assert_eq!(summary.skipped, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.nth(0).unwrap().response().unwrap().status_code, 200);
    }
}
