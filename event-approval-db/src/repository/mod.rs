pub mod approval_store;
pub mod create_batch;
pub mod load;
pub mod load_batch;
pub mod load_history;
pub mod pagination;

// Re-exports
pub use approval_store::*;
pub use create_batch::*;
pub use load::*;
pub use load_batch::*;
pub use load_history::*;
pub use pagination::*;
