mod append;
mod load_history;
pub mod repo_impl;

pub use repo_impl::EventHistoryRepositoryImpl;
