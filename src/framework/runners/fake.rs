use super::{CaptureMessage, CaptureSource, CaptureStream};
use crate::framework::core::{FakeCaptureConfig, HttpRequest, HttpResponse, SourceError};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use serde_json::json;
use tokio::time::{sleep, Duration};
use uuid::Uuid;

/// Capture source that generates simulated API traffic for demos and tests
pub struct FakeCapture {
    config: FakeCaptureConfig,
}

impl FakeCapture {
    pub fn new() -> Self {
        Self::with_config(FakeCaptureConfig::default())
    }

    pub fn with_config(config: FakeCaptureConfig) -> Self {
        Self { config }
    }

    /// Set custom exchange count
    pub fn exchange_count(mut self, count: usize) -> Self {
        self.config.exchange_count = count;
        self
    }

    /// Set delay between exchanges in milliseconds
    pub fn delay_ms(mut self, delay: u64) -> Self {
        self.config.delay_ms = delay;
        self
    }

    pub fn failure_every(mut self, every: usize) -> Self {
        self.config.failure_every = every;
        self
    }

    fn is_failure(config: &FakeCaptureConfig, index: usize) -> bool {
        config.failure_every > 0 && (index + 1) % config.failure_every == 0
    }

    fn generate_request(index: usize) -> HttpRequest {
        match index % 3 {
            0 => HttpRequest::new("GET", format!("https://api.example.com/v1/users/{}", index))
                .with_header("Accept", "application/json")
                .with_header("Cookie", "session=fake-session-token"),
            1 => HttpRequest::new("POST", "https://api.example.com/v1/orders")
                .with_header("Content-Type", "application/json")
                .with_header("Authorization", "Bearer test-key")
                .with_data(json!({"sku": format!("item-{}", index), "quantity": 1, "note": "it's a gift"})),
            _ => HttpRequest::new("GET", format!("https://cdn.example.com/assets/logo-{}.png", index))
                .with_header("Accept", "image/png"),
        }
    }

    fn generate_response(index: usize) -> HttpResponse {
        match index % 3 {
            0 => HttpResponse::new(200, "OK")
                .with_header("Content-Type", "application/json")
                .with_data(json!({"id": index, "name": format!("user-{}", index)})),
            1 => HttpResponse::new(201, "Created")
                .with_header("Content-Type", "application/json")
                .with_header("Location", format!("/v1/orders/{}", index))
                .with_data(json!({"order_id": index, "status": "accepted"})),
            _ => HttpResponse::new(200, "OK")
                .with_header("Content-Type", "image/png")
                .with_data(vec![0x89u8, 0x50, 0x4e, 0x47]),
        }
    }
}

impl Default for FakeCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureSource for FakeCapture {
    async fn run(&mut self) -> Result<CaptureStream, SourceError> {
        self.config
            .validate()
            .map_err(|e| SourceError::StartupFailed(e.to_string()))?;

        info!(
            "FakeCapture: generating {} exchanges with {}ms delay",
            self.config.exchange_count, self.config.delay_ms
        );

        let config = self.config.clone();
        let stream = async_stream::stream! {
            for i in 0..config.exchange_count {
                let id = Uuid::new_v4().to_string();
                debug!("FakeCapture: exchange #{} ({})", i + 1, id);

                yield CaptureMessage::Request {
                    id: id.clone(),
                    request: Self::generate_request(i),
                    at: Utc::now(),
                };

                sleep(Duration::from_millis(config.delay_ms / 4)).await;

                if Self::is_failure(&config, i) {
                    yield CaptureMessage::Failure {
                        id,
                        error: json!({"type": "connection_timeout", "message": "connection timed out"}).into(),
                        at: Utc::now(),
                    };
                } else {
                    yield CaptureMessage::Response {
                        id,
                        response: Self::generate_response(i),
                        at: Utc::now(),
                    };
                }

                if i + 1 < config.exchange_count {
                    sleep(Duration::from_millis(config.delay_ms)).await;
                }
            }

            info!("FakeCapture: completed {} exchanges", config.exchange_count);
        };

        Ok(Box::pin(stream))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::runners::CaptureRecorder;
    use crate::framework::storage::EventStore;
    use futures::stream::StreamExt;

    #[tokio::test]
    async fn test_fake_capture_basic() {
        let mut source = FakeCapture::new().exchange_count(2).delay_ms(4).failure_every(0);

        let messages: Vec<_> = source.run().await.unwrap().collect().await;
        assert_eq!(messages.len(), 4);
        assert!(matches!(messages[0], CaptureMessage::Request { .. }));
        assert!(matches!(messages[1], CaptureMessage::Response { .. }));
        assert_eq!(messages[0].id(), messages[1].id());
        assert_ne!(messages[0].id(), messages[2].id());
    }

    #[tokio::test]
    async fn test_fake_capture_recorded_into_store() {
        let store = EventStore::new();
        let mut source = FakeCapture::new().exchange_count(6).delay_ms(4).failure_every(3);

        let stream = source.run().await.unwrap();
        let summary = CaptureRecorder::new(store.clone()).record(stream).await;

        assert_eq!(summary.requests, 6);
        assert_eq!(summary.responses, 4);
        assert_eq!(summary.failures, 2);
        assert_eq!(summary.skipped, 0);

        let stats = store.stats();
        assert_eq!((stats.completed, stats.failed, stats.pending), (4, 2, 0));
        assert!(store.snapshot()[2].error().is_some());
        assert!(store.snapshot()[5].error().is_some());
    }

    #[tokio::test]
    async fn test_fake_capture_rejects_empty_run() {
        let mut source = FakeCapture::new().exchange_count(0);
        assert!(matches!(source.run().await, Err(SourceError::StartupFailed(_))));
    }

    #[tokio::test]
    async fn test_fake_capture_name() {
        assert_eq!(FakeCapture::new().name(), "fake");
    }
}
