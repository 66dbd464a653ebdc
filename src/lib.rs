//! In-process HTTP traffic inspector.
//!
//! A capture source pushes request/response events into an [`EventStore`];
//! the rest of the crate turns that log into what an inspector screen shows:
//! URL-filtered rows, per-event details, relative ages and `curl` exports.
//!
//! [`EventStore`]: framework::EventStore

pub mod framework;
