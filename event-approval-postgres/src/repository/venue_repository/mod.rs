mod create_batch;
mod load_batch;
mod lock_for_update;
pub mod repo_impl;

pub use repo_impl::VenueRepositoryImpl;
