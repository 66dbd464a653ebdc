use super::body::render_body;
use super::elapsed::{format_duration, format_elapsed};
use crate::framework::core::{CapturedEvent, Headers, Outcome};
use chrono::{DateTime, Utc};
use std::fmt;

/// Everything a detail screen shows for one captured event, as plain text
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub overview: Vec<(String, String)>,
    pub request_headers: Vec<(String, String)>,
    pub request_body: String,
    pub response_headers: Vec<(String, String)>,
    pub response_body: String,
    pub error: Option<String>,
}

impl EventDetail {
    pub fn from_event(event: &CapturedEvent, now: Option<DateTime<Utc>>) -> Self {
        let mut overview = Vec::new();
        if let Some(request) = &event.request {
            overview.push(("Method".to_string(), request.method.clone()));
            overview.push(("URL".to_string(), request.uri.clone()));
        }
        overview.push(("Status".to_string(), status_label(&event.outcome)));
        overview.push((
            "Started".to_string(),
            event.timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        ));
        overview.push(("Age".to_string(), format_elapsed(event.timestamp, now)));
        if let Some(duration) = event.duration() {
            overview.push(("Duration".to_string(), format_duration(duration)));
        }

        let (request_headers, request_body) = match &event.request {
            Some(request) => (header_pairs(&request.headers), render_body(&request.data)),
            None => (Vec::new(), String::new()),
        };

        let (response_headers, response_body) = match event.response() {
            Some(response) => (header_pairs(&response.headers), render_body(&response.data)),
            None => (Vec::new(), String::new()),
        };

        Self {
            overview,
            request_headers,
            request_body,
            response_headers,
            response_body,
            error: event.error().map(render_body),
        }
    }
}

/// One-word state for pending and failed events, `<code> <message>` once completed
pub fn status_label(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Pending => "pending".to_string(),
        Outcome::Completed { response, .. } => {
            if response.status_message.is_empty() {
                response.status_code.to_string()
            } else {
                format!("{} {}", response.status_code, response.status_message)
            }
        }
        Outcome::Failed { .. } => "failed".to_string(),
    }
}

fn header_pairs(headers: &Headers) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    pairs: &[(String, String)],
    body: &str,
) -> fmt::Result {
    writeln!(f, "== {}", title)?;
    for (name, value) in pairs {
        writeln!(f, "{}: {}", name, value)?;
    }
    if !body.is_empty() {
        if !pairs.is_empty() {
            writeln!(f)?;
        }
        writeln!(f, "{}", body)?;
    }
    Ok(())
}

impl fmt::Display for EventDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(f, "Overview", &self.overview, "")?;
        write_section(f, "Request", &self.request_headers, &self.request_body)?;
        write_section(f, "Response", &self.response_headers, &self.response_body)?;
        if let Some(error) = &self.error {
            write_section(f, "Error", &[], error)?;
        }
        Ok(())
    }
}
