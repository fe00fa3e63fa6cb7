pub mod memory;
pub mod models;
pub mod repository;
pub mod service;
pub mod utils;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_utils;

pub use memory::InMemoryApprovalStore;
pub use service::{ApprovalEngine, EngineConfig};
