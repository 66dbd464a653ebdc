pub mod events;
pub mod streaming;
pub mod config;
pub mod error;

pub use events::*;
pub use streaming::*;
pub use config::*;
pub use error::*;
