//! # SapMock Core
//!
//! A mock SAP OData v2 employee-directory service: fabricates synthetic
//! employee/role/privilege records and serves them in the shape a real
//! `EMPLOYEE_BASIC_SRV` endpoint would.
//!
//! ## Architecture
//!
//! - **Directory**: the employee data model, the immutable role/privilege
//!   master catalog, the shared record store, and the synthetic generator
//! - **OData**: the restricted `$filter` grammar, the skip/top query
//!   pipeline, and the `{"d": ...}` response envelope
//! - **Authz**: the role/privilege authorization-check evaluator
//! - **Export**: CSV download of the employee collection
//! - **API**: axum routing and handlers over the service document layout

pub mod api;
pub mod authz;
pub mod config;
pub mod directory;
pub mod error;
pub mod export;
pub mod observability;
pub mod odata;

pub use error::{ErrorCode, Result, SapMockError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{build_router, AppState};
    pub use crate::authz::{check_authorization, AuthorizationVerdict};
    pub use crate::directory::{
        AuthorizationObject, Employee, EmployeeGenerator, EmployeeId, EmployeeStore, Privilege,
        Role, RoleCatalog, RoleId,
    };
    pub use crate::error::{ErrorCode, Result, SapMockError};
    pub use crate::odata::{parse_filter, query_page, Clause, FilterOp, ListParams};
}
