pub mod config;
pub mod executor;
pub mod postgres_repositories;
pub mod repository;
pub mod store;
pub mod utils;

pub use config::{ConfigError, PostgresConfig};
pub use executor::Executor;
pub use postgres_repositories::{ApprovalRepositories, PostgresRepositories};
pub use store::{PgApprovalStore, PgUnitOfWork};

#[cfg(test)]
pub mod test_helper;
