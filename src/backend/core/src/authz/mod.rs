//! Authorization-check evaluation.
//!
//! Answers whether an employee, through any privilege of any assigned role,
//! holds a given `object` / `field` / `value` grant. The check is a pure data
//! lookup over master data; there is no token or session involved.
//!
//! An unknown employee id is not a not-found condition here: the check
//! degrades to a well-formed negative verdict carrying an explanatory note,
//! so the endpoint always answers in an HTTP-success shape. Plain employee
//! lookups report not-found instead; the asymmetry is deliberate and part of
//! the consumer contract.

use serde::Serialize;
use tracing::debug;

use crate::directory::master::RoleCatalog;
use crate::directory::model::Employee;
use crate::directory::store::EmployeeStore;

/// Outcome of an authorization check, serialized inside the `{"d": ...}`
/// envelope exactly as the upstream service shapes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationVerdict {
    pub employee_id: String,
    pub object: String,
    pub field: String,
    pub value: String,
    pub has_authorization: bool,
    /// Set exactly when the employee id does not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Whether any privilege reachable through the employee's roles grants
/// `field=value` under `object`.
///
/// Privileges whose name does not contain exactly one `=` separator never
/// match.
pub fn employee_has_authorization(
    employee: &Employee,
    catalog: &RoleCatalog,
    object: &str,
    field: &str,
    value: &str,
) -> bool {
    employee
        .roles
        .iter()
        .filter_map(|role_id| catalog.get(role_id))
        .flat_map(|role| role.privileges.iter())
        .any(|privilege| {
            privilege.privilege_id == object && privilege.field_value() == Some((field, value))
        })
}

/// Resolve the employee and evaluate the check, producing the full verdict.
pub fn check_authorization(
    store: &EmployeeStore,
    catalog: &RoleCatalog,
    employee_id: &str,
    object: &str,
    field: &str,
    value: &str,
) -> AuthorizationVerdict {
    let mut verdict = AuthorizationVerdict {
        employee_id: employee_id.to_string(),
        object: object.to_string(),
        field: field.to_string(),
        value: value.to_string(),
        has_authorization: false,
        note: None,
    };

    match store.by_id(employee_id) {
        Some(employee) => {
            verdict.has_authorization =
                employee_has_authorization(&employee, catalog, object, field, value);
        }
        None => {
            debug!(employee_id, "Authorization check for unknown employee");
            verdict.note = Some("Employee does not exist".to_string());
        }
    }
    verdict
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
