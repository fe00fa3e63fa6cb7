//! In-memory implementation of [`crate::repository::ApprovalStore`].
//!
//! Holds every record in process memory; all state is lost on restart. Used by the
//! engine tests and by embedders that do not need durability.

mod store;
mod unit_of_work;

pub use store::InMemoryApprovalStore;
pub use unit_of_work::InMemoryUnitOfWork;
