//! Directory data models: Employee, Role, Privilege, and master
//! AuthorizationObject definitions.
//!
//! Role and Privilege are immutable master data shared across employees; an
//! `Employee` holds lightweight [`RoleId`] references into the catalog rather
//! than per-employee copies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// Identifiers
// ═══════════════════════════════════════════════════════════════════════════════

/// Strongly-typed employee identifier.
///
/// Zero-padded sequential number (e.g. `"10001"`), immutable once assigned and
/// unique within the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Render a sequential number in the canonical zero-padded form.
    pub fn from_sequence(n: u32) -> Self {
        Self(format!("{:05}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form of the identifier, used for next-id assignment.
    pub fn numeric(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EmployeeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EmployeeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Strongly-typed role identifier (e.g. `"ADMIN"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Privilege
// ═══════════════════════════════════════════════════════════════════════════════

/// One concrete `FIELD=VALUE` grant under an authorization object.
///
/// `privilege_id` names the authorization object (e.g. `S_TCODE`) and
/// `privilege_name` carries the field/value pair (e.g. `TCD=SM30`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Privilege {
    pub privilege_id: String,
    pub privilege_name: String,
    pub description: String,
}

impl Privilege {
    pub fn new(
        privilege_id: impl Into<String>,
        privilege_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            privilege_id: privilege_id.into(),
            privilege_name: privilege_name.into(),
            description: description.into(),
        }
    }

    /// Split `privilege_name` into its `(field, value)` pair.
    ///
    /// A name must contain exactly one `=` separator to ever match an
    /// authorization check; any other shape yields `None`.
    pub fn field_value(&self) -> Option<(&str, &str)> {
        let parts: Vec<&str> = self.privilege_name.split('=').collect();
        match parts.as_slice() {
            [field, value] => Some((field, value)),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Role
// ═══════════════════════════════════════════════════════════════════════════════

/// A named bundle of privileges. Employees are assigned roles, not individual
/// privileges; role definitions are shared master data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_id: RoleId,
    pub role_name: String,
    pub description: String,
    pub privileges: Vec<Privilege>,
}

impl Role {
    pub fn new(
        role_id: impl Into<String>,
        role_name: impl Into<String>,
        description: impl Into<String>,
        privileges: Vec<Privilege>,
    ) -> Self {
        Self {
            role_id: RoleId::new(role_id),
            role_name: role_name.into(),
            description: description.into(),
            privileges,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Authorization Object
// ═══════════════════════════════════════════════════════════════════════════════

/// Master definition of an SAP-style authorization object and the field names
/// it governs. Seeds the privilege catalog; not consulted at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationObject {
    pub object_id: String,
    pub description: String,
    pub fields: Vec<String>,
}

impl AuthorizationObject {
    pub fn new(
        object_id: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<&str>,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            description: description.into(),
            fields: fields.into_iter().map(String::from).collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Employee
// ═══════════════════════════════════════════════════════════════════════════════

/// One employee record.
///
/// Field names serialize in the OData camelCase form the upstream service
/// exposes. Role assignments are catalog references and stay off the wire;
/// the Roles/Privileges sub-resources render the resolved definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: String,
    pub nationality: String,
    pub marital_status: String,
    pub position: String,
    pub job_title: String,
    pub department: String,
    pub department_name: String,
    pub hire_date: Option<NaiveDate>,
    pub termination_date: Option<NaiveDate>,
    pub work_email: String,
    pub work_phone: String,
    pub mobile_phone: String,
    pub address: String,
    pub bank_account: String,
    pub tax_id: String,
    #[serde(skip)]
    pub roles: Vec<RoleId>,
}

impl Employee {
    /// Attach a role reference, ignoring duplicates.
    pub fn assign_role(&mut self, role_id: RoleId) {
        if !self.roles.contains(&role_id) {
            self.roles.push(role_id);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
