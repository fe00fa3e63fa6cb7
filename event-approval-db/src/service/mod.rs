pub mod approval_engine;
pub mod config;

pub use approval_engine::ApprovalEngine;
pub use config::EngineConfig;
