mod create;
mod find_active_by_venue;
mod load_batch;
pub mod repo_impl;
mod update_versioned;

pub use repo_impl::EventRequestRepositoryImpl;
