//! Built-in master data: authorization objects, privileges, and the roles
//! that bundle them.
//!
//! The catalog is constructed once at startup and shared read-only. Employees
//! reference roles by id; sharing a definition across many employees needs no
//! cloning because nothing mutates it afterwards.

use std::collections::HashMap;

use super::model::{AuthorizationObject, Privilege, Role, RoleId};

/// Immutable catalog of role and privilege master data.
#[derive(Debug)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    by_id: HashMap<RoleId, usize>,
    auth_objects: Vec<AuthorizationObject>,
}

impl RoleCatalog {
    /// Build a catalog from explicit role definitions.
    pub fn new(roles: Vec<Role>, auth_objects: Vec<AuthorizationObject>) -> Self {
        let by_id = roles
            .iter()
            .enumerate()
            .map(|(i, r)| (r.role_id.clone(), i))
            .collect();
        Self {
            roles,
            by_id,
            auth_objects,
        }
    }

    /// The built-in SAP-flavored master data set.
    pub fn builtin() -> Self {
        let privileges = master_privileges();
        let grouped: HashMap<&str, Vec<Privilege>> =
            privileges.iter().fold(HashMap::new(), |mut acc, p| {
                acc.entry(p.privilege_id.as_str())
                    .or_default()
                    .push(p.clone());
                acc
            });
        let combine = |object_ids: &[&str]| -> Vec<Privilege> {
            object_ids
                .iter()
                .flat_map(|id| grouped.get(id).cloned().unwrap_or_default())
                .collect()
        };

        let roles = vec![
            Role::new(
                "ADMIN",
                "System administrator",
                "Full SAP system administration",
                combine(&["S_USER_GRP", "S_TCODE", "S_USER_AUTH"]),
            ),
            Role::new(
                "DEVELOPER",
                "Developer",
                "SAP developer access",
                combine(&["S_TCODE", "S_PROGRAM", "S_DEVELOP", "S_TRANSPRT"]),
            ),
            Role::new(
                "SALES",
                "Sales representative",
                "SAP sales functions",
                combine(&["S_TCODE", "VA_VBAK_VBK", "SD_VBAK_AAT"]),
            ),
            Role::new(
                "BASIS",
                "Technical administrator",
                "System technical support",
                combine(&["S_RFC", "S_DATASET"]),
            ),
            Role::new(
                "HR",
                "HR administrator",
                "SAP human resources functions",
                combine(&["P_ORGIN"]),
            ),
        ];

        Self::new(roles, master_authorization_objects())
    }

    /// Create an empty catalog. Generation against it fails the no-roles
    /// precondition; useful in tests.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Look up a role definition by id.
    pub fn get(&self, role_id: &RoleId) -> Option<&Role> {
        self.by_id.get(role_id).map(|&i| &self.roles[i])
    }

    /// All role definitions, in declaration order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn authorization_objects(&self) -> &[AuthorizationObject] {
        &self.auth_objects
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// The default role a new employee receives, keyed by department name.
    ///
    /// IT departments get DEVELOPER, sales gets SALES, everything else
    /// (including a missing department) falls back to ADMIN.
    pub fn default_role_for_department(&self, department_name: Option<&str>) -> Option<&Role> {
        let role_id = match department_name.map(str::to_ascii_lowercase).as_deref() {
            Some("it") => "DEVELOPER",
            Some("sales") => "SALES",
            _ => "ADMIN",
        };
        self.get(&RoleId::new(role_id))
    }
}

fn master_privileges() -> Vec<Privilege> {
    vec![
        Privilege::new("S_USER_GRP", "ACTVT=01", "Create user group"),
        Privilege::new("S_USER_GRP", "ACTVT=02", "Change user group"),
        Privilege::new("S_USER_GRP", "ACTVT=03", "Display user group"),
        Privilege::new("S_TCODE", "TCD=SM30", "Run table maintenance"),
        Privilege::new("S_TCODE", "TCD=SE38", "Run ABAP program"),
        Privilege::new("S_TCODE", "TCD=VA01", "Create sales order"),
        Privilege::new("S_PROGRAM", "ACTVT=03", "Display program"),
        Privilege::new("S_USER_AUTH", "ACTVT=01", "Grant authorization"),
        Privilege::new("S_DEVELOP", "DEV=ALL", "Development access"),
        Privilege::new("S_TRANSPRT", "TR=ALL", "Transport access"),
        Privilege::new("VA_VBAK_VBK", "SALES=ALL", "Display sales orders"),
        Privilege::new("SD_VBAK_AAT", "SALES=CHANGE", "Change sales orders"),
        Privilege::new("S_RFC", "RFC=ALL", "RFC access"),
        Privilege::new("S_DATASET", "FILE=ALL", "File access"),
        Privilege::new("P_ORGIN", "HR=ALL", "HR master data access"),
    ]
}

fn master_authorization_objects() -> Vec<AuthorizationObject> {
    vec![
        AuthorizationObject::new("S_USER_GRP", "User group administration", vec!["ACTVT"]),
        AuthorizationObject::new("S_TCODE", "Transaction code execution", vec!["TCD"]),
        AuthorizationObject::new("S_PROGRAM", "Program execution", vec!["ACTVT"]),
        AuthorizationObject::new("S_DATASET", "File access", vec!["ACTVT", "FILENAME"]),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_resolves_roles() {
        let catalog = RoleCatalog::builtin();
        let admin = catalog.get(&RoleId::new("ADMIN")).unwrap();
        assert_eq!(admin.role_name, "System administrator");
        assert!(admin
            .privileges
            .iter()
            .any(|p| p.privilege_id == "S_TCODE" && p.privilege_name == "TCD=SM30"));
        assert!(catalog.get(&RoleId::new("NOPE")).is_none());
    }

    #[test]
    fn roles_bundle_all_privileges_of_their_objects() {
        let catalog = RoleCatalog::builtin();
        let developer = catalog.get(&RoleId::new("DEVELOPER")).unwrap();
        // S_TCODE contributes three grants, S_PROGRAM/S_DEVELOP/S_TRANSPRT one each.
        assert_eq!(developer.privileges.len(), 6);
    }

    #[test]
    fn default_role_follows_department() {
        let catalog = RoleCatalog::builtin();
        let pick = |dept| {
            catalog
                .default_role_for_department(dept)
                .unwrap()
                .role_id
                .as_str()
                .to_string()
        };
        assert_eq!(pick(Some("IT")), "DEVELOPER");
        assert_eq!(pick(Some("Sales")), "SALES");
        assert_eq!(pick(Some("Finance")), "ADMIN");
        assert_eq!(pick(None), "ADMIN");
    }

    #[test]
    fn empty_catalog_has_no_default_role() {
        let catalog = RoleCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.default_role_for_department(Some("IT")).is_none());
    }
}
