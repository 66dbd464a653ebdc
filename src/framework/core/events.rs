use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Ordered header mapping. Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Builder-style variant of [`Headers::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Payload carried by a request, a response or a failure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    #[default]
    Null,
    Text(String),
    Json(Value),
    Bytes(Vec<u8>),
}

impl Body {
    pub fn is_null(&self) -> bool {
        matches!(self, Body::Null | Body::Json(Value::Null))
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Body::Null,
            Value::String(text) => Body::Text(text),
            other => Body::Json(other),
        }
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRequest {
    pub method: String,
    pub uri: String,
    pub headers: Headers,
    pub data: Body,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: Headers::new(),
            data: Body::Null,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_data(mut self, data: impl Into<Body>) -> Self {
        self.data = data.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_message: String,
    pub headers: Headers,
    pub data: Body,
}

impl HttpResponse {
    pub fn new(status_code: u16, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
            headers: Headers::new(),
            data: Body::Null,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_data(mut self, data: impl Into<Body>) -> Self {
        self.data = data.into();
        self
    }
}

/// Terminal state of a captured exchange. An event is in exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    Pending,
    Completed {
        response: HttpResponse,
        received_at: DateTime<Utc>,
    },
    Failed {
        error: Body,
        failed_at: DateTime<Utc>,
    },
}

impl Outcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    /// Instant the exchange settled, if it has
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Outcome::Pending => None,
            Outcome::Completed { received_at, .. } => Some(*received_at),
            Outcome::Failed { failed_at, .. } => Some(*failed_at),
        }
    }
}

/// One intercepted network exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub request: Option<HttpRequest>,
    pub outcome: Outcome,
}

impl CapturedEvent {
    /// Create a pending event with a fresh id and the current time
    pub fn pending(request: HttpRequest) -> Self {
        Self::new_with_id_and_timestamp(Uuid::new_v4().to_string(), Utc::now(), Some(request))
    }

    pub fn new_with_id_and_timestamp(
        id: String,
        timestamp: DateTime<Utc>,
        request: Option<HttpRequest>,
    ) -> Self {
        Self {
            id,
            timestamp,
            request,
            outcome: Outcome::Pending,
        }
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        match &self.outcome {
            Outcome::Completed { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Body> {
        match &self.outcome {
            Outcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Time between capture and settlement
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.outcome
            .settled_at()
            .map(|settled| settled - self.timestamp)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
