pub mod approval_service;
pub mod clock;
pub mod notification;

pub use approval_service::*;
pub use clock::*;
pub use notification::*;
