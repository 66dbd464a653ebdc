use crate::framework::core::{Body, HttpRequest, HttpResponse, SourceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::Stream;
use std::pin::Pin;

/// What an interceptor reports about one exchange
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureMessage {
    Request {
        id: String,
        request: HttpRequest,
        at: DateTime<Utc>,
    },
    Response {
        id: String,
        response: HttpResponse,
        at: DateTime<Utc>,
    },
    Failure {
        id: String,
        error: Body,
        at: DateTime<Utc>,
    },
}

impl CaptureMessage {
    pub fn id(&self) -> &str {
        match self {
            CaptureMessage::Request { id, .. }
            | CaptureMessage::Response { id, .. }
            | CaptureMessage::Failure { id, .. } => id,
        }
    }
}

/// Type alias for capture message streams
pub type CaptureStream = Pin<Box<dyn Stream<Item = CaptureMessage> + Send>>;

/// Anything that intercepts traffic and reports it as capture messages
#[async_trait]
pub trait CaptureSource: Send + Sync {
    /// Start capturing and return the stream of messages
    async fn run(&mut self) -> Result<CaptureStream, SourceError>;

    /// Get the name of this source
    fn name(&self) -> &str;
}

pub mod common;
pub mod fake;

pub use common::{CaptureRecorder, RecordSummary};
pub use fake::FakeCapture;
