//! Data-access objects, one per entity.
//!
//! Each DAO borrows the shared pool and runs exactly one parameterised
//! statement per call; the pooled connection is released when the statement
//! completes. Errors are returned as raw `sqlx::Error`.

pub mod consumption;
pub mod device;
pub mod session;
pub mod user;

pub use consumption::ConsumptionDao;
pub use device::DeviceDao;
pub use session::SessionDao;
pub use user::UserDao;
