pub mod catalog;
pub mod host;
pub mod realtime;

// Re-export the main types for easy access
pub use catalog::metric_ids;
pub use host::Host;
pub use realtime::*;
