//! Text rendering for captured events
//!
//! - `body`: display and wire text for payloads
//! - `curl`: shell command export
//! - `elapsed`: relative timestamps and durations
//! - `detail`: per-event detail sections

pub mod body;
pub mod curl;
pub mod elapsed;
pub mod detail;

pub use body::{body_to_json, render_body};
pub use curl::{curl_for_event, to_curl};
pub use detail::{status_label, EventDetail};
pub use elapsed::{format_duration, format_elapsed};
