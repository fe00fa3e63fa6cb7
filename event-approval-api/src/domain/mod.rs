pub mod action;
pub mod actor;
pub mod event;
pub mod history;
pub mod schedule;
pub mod status;
pub mod venue;

pub use action::*;
pub use actor::*;
pub use event::*;
pub use history::*;
pub use schedule::*;
pub use status::*;
pub use venue::*;
