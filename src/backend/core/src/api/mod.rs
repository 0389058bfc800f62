//! HTTP layer for the mock service.
//!
//! Routes mirror the SAP OData v2 service document layout under
//! `/sap/opu/odata/sap/EMPLOYEE_BASIC_SRV`:
//!
//! - `POST /sap/mock/generate-employees?count=N` - destructive regeneration
//! - `GET  /Employees` - paged list (`$skip`, `$top`, `$filter`)
//! - `POST /Employees` - append one employee
//! - `GET  /Employees/:employeeId` - single record
//! - `GET  /Employees/:employeeId/Roles` - resolved role definitions
//! - `GET  /Employees/:employeeId/Privileges` - flattened privileges
//! - `GET  /Employees/:employeeId/CheckAuthorization` - authorization verdict
//!
//! Plus the unversioned `/health` probe and the `/download/employees` CSV
//! export at the root.

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::directory::{EmployeeGenerator, EmployeeStore, RoleCatalog};
use crate::odata::envelope::SERVICE_ROOT;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EmployeeStore>,
    pub catalog: Arc<RoleCatalog>,
    pub generator: Arc<EmployeeGenerator>,
    /// Domain prefixed to `__metadata.id` entity URLs.
    pub metadata_domain: Arc<str>,
}

impl AppState {
    pub fn new(
        store: Arc<EmployeeStore>,
        catalog: Arc<RoleCatalog>,
        generator: Arc<EmployeeGenerator>,
        metadata_domain: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            catalog,
            generator,
            metadata_domain: metadata_domain.into(),
        }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/download/employees", get(handlers::download_employees_csv))
        .nest(SERVICE_ROOT, service_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Routes under the OData service root.
fn service_router() -> Router<AppState> {
    Router::new()
        .route(
            "/sap/mock/generate-employees",
            post(handlers::generate_employees),
        )
        .route(
            "/Employees",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route("/Employees/:employee_id", get(handlers::employee_detail))
        .route(
            "/Employees/:employee_id/Roles",
            get(handlers::employee_roles),
        )
        .route(
            "/Employees/:employee_id/Privileges",
            get(handlers::employee_privileges),
        )
        .route(
            "/Employees/:employee_id/CheckAuthorization",
            get(handlers::check_authorization),
        )
}
