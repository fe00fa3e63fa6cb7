pub mod event_history;
pub mod event_request;
pub mod identifiable;
pub mod venue;
pub mod versioned;

// Re-exports
pub use event_history::*;
pub use event_request::*;
pub use identifiable::*;
pub use venue::*;
pub use versioned::*;
