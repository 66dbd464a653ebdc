pub mod core;
pub mod query;
pub mod storage;
pub mod render;
pub mod view;
pub mod watch;
pub mod runners;

// Re-export commonly used types for convenience
pub use self::core::{
    Body, CapturedEvent, FrameworkError, Headers, HttpRequest, HttpResponse, InspectorConfig,
    Outcome, StoreChange, StoreError,
};
pub use query::filter_events;
pub use render::{curl_for_event, format_elapsed, render_body, to_curl, EventDetail};
pub use runners::{CaptureMessage, CaptureRecorder, CaptureSource, FakeCapture};
pub use storage::{EventStore, StoreStats};
pub use view::{LogRow, LogView};
pub use watch::{LogWatcher, RefreshReason};
