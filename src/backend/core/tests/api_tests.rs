//! HTTP surface tests: routing, envelopes, and not-found policies.
//!
//! Exercises the router directly with `tower::ServiceExt::oneshot`; no
//! network involved.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use sapmock_core::api::{build_router, AppState};
use sapmock_core::directory::{
    Employee, EmployeeGenerator, EmployeeId, EmployeeStore, RoleCatalog, RoleId, ID_BASE_OFFSET,
};

const SERVICE_ROOT: &str = "/sap/opu/odata/sap/EMPLOYEE_BASIC_SRV";

fn app_state(employees: Vec<Employee>) -> AppState {
    let catalog = Arc::new(RoleCatalog::builtin());
    let store = Arc::new(EmployeeStore::new(ID_BASE_OFFSET));
    store.replace_all(employees);
    let generator = Arc::new(EmployeeGenerator::new(catalog.clone(), ID_BASE_OFFSET));
    AppState::new(store, catalog, generator, "http://localhost:8080")
}

fn fixture_employees(count: u32) -> Vec<Employee> {
    (1..=count)
        .map(|n| Employee {
            employee_id: EmployeeId::from_sequence(10_000 + n),
            first_name: format!("First{}", n),
            department: if n % 2 == 0 { "2001" } else { "1001" }.into(),
            department_name: "IT".into(),
            roles: vec![RoleId::new("DEVELOPER")],
            ..Employee::default()
        })
        .collect()
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
    let app = build_router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// ============================================================================
// List endpoint
// ============================================================================

#[tokio::test]
async fn test_list_wraps_results_in_odata_envelope() {
    let state = app_state(fixture_employees(3));
    let (status, body) = get_json(state, &format!("{}/Employees", SERVICE_ROOT)).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["d"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["employeeId"], "10001");
    assert_eq!(results[0]["__metadata"]["type"], "EMPLOYEE_BASIC_SRV.Employee");
    assert_eq!(
        results[0]["__metadata"]["id"],
        format!("http://localhost:8080{}/Employees('10001')", SERVICE_ROOT)
    );
}

#[tokio::test]
async fn test_list_honors_skip_top_and_filter() {
    let state = app_state(fixture_employees(6));
    let uri = format!(
        "{}/Employees?$skip=1&$top=2&$filter=department%20eq%20%271001%27",
        SERVICE_ROOT
    );
    let (status, body) = get_json(state, &uri).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["d"]["results"].as_array().unwrap();
    // Odd-numbered fixtures carry department 1001: 10001, 10003, 10005.
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["employeeId"], "10003");
    assert_eq!(results[1]["employeeId"], "10005");
}

#[tokio::test]
async fn test_list_defaults_to_top_ten() {
    let state = app_state(fixture_employees(15));
    let (_, body) = get_json(state, &format!("{}/Employees", SERVICE_ROOT)).await;
    assert_eq!(body["d"]["results"].as_array().unwrap().len(), 10);
}

// ============================================================================
// Detail endpoint and not-found policy
// ============================================================================

#[tokio::test]
async fn test_detail_wraps_single_record() {
    let state = app_state(fixture_employees(2));
    let (status, body) = get_json(state, &format!("{}/Employees/10002", SERVICE_ROOT)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["d"]["employeeId"], "10002");
    assert_eq!(body["d"]["__metadata"]["type"], "EMPLOYEE_BASIC_SRV.Employee");
}

#[tokio::test]
async fn test_detail_not_found_is_404_with_odata_error_envelope() {
    let state = app_state(fixture_employees(1));
    let (status, body) = get_json(state, &format!("{}/Employees/99999", SERVICE_ROOT)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NotFound");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("99999"));
}

// ============================================================================
// Sub-resources
// ============================================================================

#[tokio::test]
async fn test_roles_subresource_resolves_catalog_definitions() {
    let state = app_state(fixture_employees(1));
    let (status, body) = get_json(state, &format!("{}/Employees/10001/Roles", SERVICE_ROOT)).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["d"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["roleId"], "DEVELOPER");
    assert_eq!(results[0]["__metadata"]["type"], "EMPLOYEE_BASIC_SRV.Role");
    assert!(results[0]["privileges"].as_array().unwrap().len() > 1);
}

#[tokio::test]
async fn test_privileges_subresource_flattens_and_dedups() {
    let mut employees = fixture_employees(1);
    // ADMIN and DEVELOPER both bundle the S_TCODE grants; the flattened
    // privilege list must carry each grant once.
    employees[0].roles = vec![RoleId::new("ADMIN"), RoleId::new("DEVELOPER")];
    let state = app_state(employees);
    let (status, body) = get_json(
        state,
        &format!("{}/Employees/10001/Privileges", SERVICE_ROOT),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["d"]["results"].as_array().unwrap();
    let sm30_count = results
        .iter()
        .filter(|p| p["privilegeId"] == "S_TCODE" && p["privilegeName"] == "TCD=SM30")
        .count();
    assert_eq!(sm30_count, 1);
}

#[tokio::test]
async fn test_subresources_share_the_404_policy() {
    for path in ["Roles", "Privileges"] {
        let state = app_state(fixture_employees(1));
        let (status, body) =
            get_json(state, &format!("{}/Employees/99999/{}", SERVICE_ROOT, path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NotFound");
    }
}

// ============================================================================
// Authorization check
// ============================================================================

#[tokio::test]
async fn test_check_authorization_grants_for_role_privilege() {
    let state = app_state(fixture_employees(1));
    let uri = format!(
        "{}/Employees/10001/CheckAuthorization?object=S_TCODE&field=TCD&value=SM30",
        SERVICE_ROOT
    );
    let (status, body) = get_json(state, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["d"]["hasAuthorization"], true);
    assert!(body["d"].get("note").is_none());
}

#[tokio::test]
async fn test_check_authorization_unknown_employee_is_200_with_note() {
    let state = app_state(fixture_employees(1));
    let uri = format!(
        "{}/Employees/99999/CheckAuthorization?object=S_TCODE&field=TCD&value=SM30",
        SERVICE_ROOT
    );
    let (status, body) = get_json(state, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["d"]["hasAuthorization"], false);
    assert!(!body["d"]["note"].as_str().unwrap().is_empty());
}

// ============================================================================
// Generation
// ============================================================================

#[tokio::test]
async fn test_generate_replaces_the_collection() {
    let state = app_state(fixture_employees(5));
    let app = build_router(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!(
                    "{}/sap/mock/generate-employees?count=3",
                    SERVICE_ROOT
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["d"]["results"], "success");
    assert_eq!(state.store.len(), 3);
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_assigns_id_and_default_role() {
    let state = app_state(fixture_employees(2));
    let app = build_router(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("{}/Employees", SERVICE_ROOT))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"firstName": "Nora", "departmentName": "Sales"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["d"]["employeeId"], "10003");
    assert_eq!(body["d"]["firstName"], "Nora");

    let created = state.store.by_id("10003").unwrap();
    assert_eq!(created.roles, vec![RoleId::new("SALES")]);
}

// ============================================================================
// CSV export and health
// ============================================================================

#[tokio::test]
async fn test_csv_download_headers_and_content() {
    let state = app_state(fixture_employees(2));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/download/employees")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=UTF-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"employees.csv\""
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with('\u{feff}'));
    assert_eq!(text.lines().count(), 3);
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = app_state(Vec::new());
    let (status, body) = get_json(state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
