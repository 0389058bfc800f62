//! CSV export of the employee collection.
//!
//! The output targets spreadsheet imports: UTF-8 with a BOM so Excel detects
//! the encoding, and the long digit strings (bank account, tax id) wrapped in
//! the `="..."` guard so they survive as text instead of collapsing into
//! scientific notation.

use crate::directory::model::Employee;

/// Column order of the export, matching the OData field names.
pub const CSV_HEADER: [&str; 20] = [
    "employeeId",
    "firstName",
    "lastName",
    "middleName",
    "birthDate",
    "gender",
    "nationality",
    "maritalStatus",
    "position",
    "jobTitle",
    "department",
    "departmentName",
    "hireDate",
    "terminationDate",
    "workEmail",
    "workPhone",
    "mobilePhone",
    "address",
    "bankAccount",
    "taxId",
];

/// Render the collection as one CSV document (BOM + header + one row per
/// employee).
pub fn employees_to_csv(employees: &[Employee]) -> String {
    let mut out = String::from("\u{feff}");
    out.push_str(&CSV_HEADER.join(","));
    out.push_str("\r\n");
    for employee in employees {
        out.push_str(&record(employee).join(","));
        out.push_str("\r\n");
    }
    out
}

fn record(e: &Employee) -> Vec<String> {
    vec![
        field(e.employee_id.as_str()),
        field(&e.first_name),
        field(&e.last_name),
        field(&e.middle_name),
        date_field(e.birth_date),
        field(&e.gender),
        field(&e.nationality),
        field(&e.marital_status),
        field(&e.position),
        field(&e.job_title),
        field(&e.department),
        field(&e.department_name),
        date_field(e.hire_date),
        date_field(e.termination_date),
        field(&e.work_email),
        field(&e.work_phone),
        field(&e.mobile_phone),
        field(&e.address),
        guarded_field(&e.bank_account),
        guarded_field(&e.tax_id),
    ]
}

fn date_field(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Quote a field when it contains a separator, quote, or line break.
fn field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Spreadsheet text guard: `="123"` keeps digit strings verbatim.
fn guarded_field(value: &str) -> String {
    field(&format!("=\"{}\"", value))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::model::EmployeeId;
    use chrono::NaiveDate;

    fn employee() -> Employee {
        Employee {
            employee_id: EmployeeId::new("10001"),
            first_name: "Alice".into(),
            last_name: "Meyer, Dr.".into(),
            hire_date: NaiveDate::from_ymd_opt(2020, 3, 1),
            bank_account: "123456789012".into(),
            tax_id: "987654321".into(),
            ..Employee::default()
        }
    }

    #[test]
    fn starts_with_bom_and_header() {
        let csv = employees_to_csv(&[]);
        assert!(csv.starts_with('\u{feff}'));
        assert!(csv.contains("employeeId,firstName,lastName"));
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn one_row_per_employee_with_iso_dates() {
        let csv = employees_to_csv(&[employee()]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("10001,Alice,"));
        assert!(row.contains("2020-03-01"));
    }

    #[test]
    fn commas_in_values_are_quoted() {
        let csv = employees_to_csv(&[employee()]);
        assert!(csv.contains("\"Meyer, Dr.\""));
    }

    #[test]
    fn digit_identifiers_carry_the_text_guard() {
        let csv = employees_to_csv(&[employee()]);
        assert!(csv.contains("\"=\"\"123456789012\"\"\""));
        assert!(csv.contains("\"=\"\"987654321\"\"\""));
    }
}
