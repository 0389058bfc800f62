//! Employee directory: data model, master role/privilege catalog, the shared
//! record store, and the synthetic employee generator.

pub mod generator;
pub mod master;
pub mod model;
pub mod store;

pub use generator::EmployeeGenerator;
pub use master::RoleCatalog;
pub use model::{AuthorizationObject, Employee, EmployeeId, Privilege, Role, RoleId};
pub use store::EmployeeStore;

/// Base offset for sequential employee identifiers (`10000 + n`, zero-padded).
pub const ID_BASE_OFFSET: u32 = 10_000;
