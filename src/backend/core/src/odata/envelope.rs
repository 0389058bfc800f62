//! OData v2 response envelope types.
//!
//! List results ship as `{"d": {"results": [...]}}`, single results as
//! `{"d": {...}}`, and errors as `{"error": {"code": ..., "message": ...}}`.
//! Entries optionally carry the legacy `__metadata` block with the entity
//! type and canonical URL.

use serde::Serialize;
use serde_json::{json, Value};

use crate::directory::model::Employee;

/// Canonical service root path of the mock service document.
pub const SERVICE_ROOT: &str = "/sap/opu/odata/sap/EMPLOYEE_BASIC_SRV";

/// OData entity type names.
pub const EMPLOYEE_TYPE: &str = "EMPLOYEE_BASIC_SRV.Employee";
pub const ROLE_TYPE: &str = "EMPLOYEE_BASIC_SRV.Role";
pub const PRIVILEGE_TYPE: &str = "EMPLOYEE_BASIC_SRV.Privilege";

// ═══════════════════════════════════════════════════════════════════════════════
// Envelopes
// ═══════════════════════════════════════════════════════════════════════════════

/// `{"d": {"results": [...]}}`
#[derive(Debug, Clone, Serialize)]
pub struct ODataList<T> {
    pub d: ResultSet<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultSet<T> {
    pub results: Vec<T>,
}

impl<T> ODataList<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self {
            d: ResultSet { results },
        }
    }
}

/// `{"d": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ODataSingle<T> {
    pub d: T,
}

impl<T> ODataSingle<T> {
    pub fn new(d: T) -> Self {
        Self { d }
    }
}

/// `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ODataError {
    pub error: ODataErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ODataErrorBody {
    pub code: String,
    pub message: String,
}

impl ODataError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ODataErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Entry construction
// ═══════════════════════════════════════════════════════════════════════════════

/// Serialize a value and prepend a `__metadata` block.
///
/// Returns the bare serialized value when it is not a JSON object (nothing to
/// attach metadata to).
pub fn with_metadata(value: &impl Serialize, entity_type: &str, id_url: Option<String>) -> Value {
    let serialized = serde_json::to_value(value).unwrap_or(Value::Null);
    let Value::Object(fields) = serialized else {
        return serialized;
    };

    let metadata = match id_url {
        Some(id) => json!({ "id": id, "type": entity_type }),
        None => json!({ "type": entity_type }),
    };

    let mut entry = serde_json::Map::with_capacity(fields.len() + 1);
    entry.insert("__metadata".to_string(), metadata);
    entry.extend(fields);
    Value::Object(entry)
}

/// An employee entry with its canonical `__metadata.id` URL.
pub fn employee_entry(employee: &Employee, metadata_domain: &str) -> Value {
    let id_url = format!(
        "{}{}/Employees('{}')",
        metadata_domain, SERVICE_ROOT, employee.employee_id
    );
    with_metadata(employee, EMPLOYEE_TYPE, Some(id_url))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
