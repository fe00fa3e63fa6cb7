pub mod db_init;
pub mod event_history_repository;
pub mod event_request_repository;
pub mod venue_repository;

#[cfg(test)]
pub mod test_utils;

pub use event_history_repository::EventHistoryRepositoryImpl;
pub use event_request_repository::EventRequestRepositoryImpl;
pub use venue_repository::VenueRepositoryImpl;
