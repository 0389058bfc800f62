//! API request handlers with proper error propagation.
//!
//! Handlers return `Result<impl IntoResponse, SapMockError>` so that errors
//! are converted to the OData error envelope via the `IntoResponse`
//! implementation on `SapMockError`. The one deliberate exception is
//! CheckAuthorization: an unknown employee there is a successful negative
//! verdict, never an error response.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::AppState;
use crate::authz;
use crate::directory::model::{Employee, Privilege, Role};
use crate::error::SapMockError;
use crate::export;
use crate::odata::envelope::{
    employee_entry, with_metadata, ODataList, ODataSingle, PRIVILEGE_TYPE, ROLE_TYPE,
};
use crate::odata::query::{query_page, ListParams};

// ═══════════════════════════════════════════════════════════════════════════════
// Health Check
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Generation
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub count: usize,
}

pub async fn generate_employees(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Result<impl IntoResponse, SapMockError> {
    info!(count = params.count, "Generating mock employees");

    let employees = state.generator.generate(params.count)?;
    state.store.replace_all(employees);

    info!(count = params.count, "Mock employee generation complete");
    Ok(Json(serde_json::json!({"d": {"results": "success"}})))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Employee Collection
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, SapMockError> {
    info!(
        skip = params.skip,
        top = params.top,
        filter = params.filter.as_deref().unwrap_or(""),
        "Employee list request"
    );

    let records = state.store.all();
    let page = query_page(&records, params.skip, params.top, params.filter.as_deref());
    info!(returned = page.len(), "Employee list response");

    let entries: Vec<Value> = page
        .iter()
        .map(|e| employee_entry(e, &state.metadata_domain))
        .collect();
    Ok(Json(ODataList::new(entries)))
}

/// Request body for creating one employee. The identifier and role
/// assignments are server-side concerns and cannot be supplied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub marital_status: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub department_name: String,
    pub hire_date: Option<NaiveDate>,
    pub termination_date: Option<NaiveDate>,
    #[serde(default)]
    pub work_email: String,
    #[serde(default)]
    pub work_phone: String,
    #[serde(default)]
    pub mobile_phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub bank_account: String,
    #[serde(default)]
    pub tax_id: String,
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, SapMockError> {
    let department_name = (!req.department_name.is_empty()).then_some(req.department_name.as_str());
    let default_role = state
        .catalog
        .default_role_for_department(department_name)
        .ok_or_else(|| {
            SapMockError::no_roles("No master roles defined; cannot assign a default role")
        })?;

    let mut employee = Employee {
        first_name: req.first_name,
        last_name: req.last_name,
        middle_name: req.middle_name,
        birth_date: req.birth_date,
        gender: req.gender,
        nationality: req.nationality,
        marital_status: req.marital_status,
        position: req.position,
        job_title: req.job_title,
        department: req.department,
        department_name: req.department_name,
        hire_date: req.hire_date,
        termination_date: req.termination_date,
        work_email: req.work_email,
        work_phone: req.work_phone,
        mobile_phone: req.mobile_phone,
        address: req.address,
        bank_account: req.bank_account,
        tax_id: req.tax_id,
        ..Employee::default()
    };
    employee.assign_role(default_role.role_id.clone());

    let created = state.store.append(employee);
    info!(employee_id = %created.employee_id, "Employee created");

    let entry = employee_entry(&created, &state.metadata_domain);
    Ok((StatusCode::CREATED, Json(ODataSingle::new(entry))))
}

pub async fn employee_detail(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<impl IntoResponse, SapMockError> {
    info!(employee_id = %employee_id, "Employee detail request");

    let employee = state
        .store
        .by_id(&employee_id)
        .ok_or_else(|| SapMockError::not_found("Employee", &employee_id))?;

    let entry = employee_entry(&employee, &state.metadata_domain);
    Ok(Json(ODataSingle::new(entry)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sub-resources
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn employee_roles(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<impl IntoResponse, SapMockError> {
    let employee = state
        .store
        .by_id(&employee_id)
        .ok_or_else(|| SapMockError::not_found("Employee", &employee_id))?;

    let entries: Vec<Value> = resolved_roles(&state, &employee)
        .into_iter()
        .map(|role| with_metadata(role, ROLE_TYPE, None))
        .collect();
    Ok(Json(ODataList::new(entries)))
}

pub async fn employee_privileges(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<impl IntoResponse, SapMockError> {
    let employee = state
        .store
        .by_id(&employee_id)
        .ok_or_else(|| SapMockError::not_found("Employee", &employee_id))?;

    let mut privileges: Vec<&Privilege> = Vec::new();
    for role in resolved_roles(&state, &employee) {
        for privilege in &role.privileges {
            if !privileges
                .iter()
                .any(|p| p.privilege_id == privilege.privilege_id
                    && p.privilege_name == privilege.privilege_name)
            {
                privileges.push(privilege);
            }
        }
    }

    let entries: Vec<Value> = privileges
        .into_iter()
        .map(|privilege| with_metadata(privilege, PRIVILEGE_TYPE, None))
        .collect();
    Ok(Json(ODataList::new(entries)))
}

fn resolved_roles<'a>(state: &'a AppState, employee: &Employee) -> Vec<&'a Role> {
    employee
        .roles
        .iter()
        .filter_map(|role_id| {
            let role = state.catalog.get(role_id);
            if role.is_none() {
                warn!(role_id = %role_id, "Employee references an unknown role");
            }
            role
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Authorization Check
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct AuthorizationParams {
    pub object: String,
    pub field: String,
    pub value: String,
}

pub async fn check_authorization(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(params): Query<AuthorizationParams>,
) -> impl IntoResponse {
    let verdict = authz::check_authorization(
        &state.store,
        &state.catalog,
        &employee_id,
        &params.object,
        &params.field,
        &params.value,
    );
    info!(
        employee_id = %employee_id,
        object = %params.object,
        authorized = verdict.has_authorization,
        "Authorization check"
    );
    Json(ODataSingle::new(verdict))
}

// ═══════════════════════════════════════════════════════════════════════════════
// CSV Export
// ═══════════════════════════════════════════════════════════════════════════════

pub async fn download_employees_csv(State(state): State<AppState>) -> impl IntoResponse {
    let employees = state.store.all();
    info!(count = employees.len(), "CSV export request");
    let body = export::employees_to_csv(&employees);

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=UTF-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"employees.csv\"",
            ),
        ],
        body,
    )
}
