//! Synthetic employee fabrication.
//!
//! Fabricated records look like real SAP HR data: localized names, plausible
//! hire/birth dates, department codes, bank/tax identifiers, and role
//! assignments driven by the department. The generator never produces a
//! roleless employee; with no master roles to assign from it refuses to run.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use fake::faker::address::en::{BuildingNumber, CityName, CountryCode, StreetName};
use fake::faker::job::en::{Position, Title as JobTitle};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::{CellNumber, PhoneNumber};
use fake::Fake;
use rand::Rng;

use crate::error::{Result, SapMockError};

use super::master::RoleCatalog;
use super::model::{Employee, EmployeeId, RoleId};

const DEPARTMENTS: [(&str, &str); 3] = [("IT", "1001"), ("Sales", "2001"), ("Admin", "0001")];
const MARITAL_STATUSES: [&str; 4] = ["Single", "Married", "Divorced", "Widowed"];
const GENDERS: [&str; 2] = ["M", "F"];

/// Fabricates employee records against a role catalog.
#[derive(Debug)]
pub struct EmployeeGenerator {
    catalog: Arc<RoleCatalog>,
    base_offset: u32,
}

impl EmployeeGenerator {
    pub fn new(catalog: Arc<RoleCatalog>, base_offset: u32) -> Self {
        Self {
            catalog,
            base_offset,
        }
    }

    /// Fabricate `count` employees, numbered sequentially from the base
    /// offset. Fails when the catalog holds no roles to assign from.
    pub fn generate(&self, count: usize) -> Result<Vec<Employee>> {
        if self.catalog.is_empty() {
            return Err(SapMockError::no_roles(
                "No master roles defined; cannot assign roles to generated employees",
            ));
        }
        let mut rng = rand::thread_rng();
        (1..=count as u32)
            .map(|seq| self.fabricate(seq, &mut rng))
            .collect()
    }

    fn fabricate(&self, seq: u32, rng: &mut impl Rng) -> Result<Employee> {
        let today = Utc::now().date_naive();
        let (department_name, department_code) = DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())];

        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let middle_name: String = if rng.gen_bool(0.5) {
            FirstName().fake_with_rng(rng)
        } else {
            String::new()
        };

        let mut employee = Employee {
            employee_id: EmployeeId::from_sequence(self.base_offset + seq),
            work_email: company_email(&first_name, &last_name),
            first_name,
            last_name,
            middle_name,
            birth_date: Some(days_ago(today, rng.gen_range(20 * 365..60 * 365))),
            gender: GENDERS[rng.gen_range(0..GENDERS.len())].to_string(),
            nationality: CountryCode().fake_with_rng(rng),
            marital_status: MARITAL_STATUSES[rng.gen_range(0..MARITAL_STATUSES.len())].to_string(),
            position: Position().fake_with_rng(rng),
            job_title: JobTitle().fake_with_rng(rng),
            department: department_code.to_string(),
            department_name: department_name.to_string(),
            hire_date: Some(days_ago(today, rng.gen_range(1..=5000))),
            termination_date: rng
                .gen_bool(0.5)
                .then(|| today + Duration::days(rng.gen_range(1..=1000))),
            work_phone: PhoneNumber().fake_with_rng(rng),
            mobile_phone: CellNumber().fake_with_rng(rng),
            address: street_address(rng),
            bank_account: digits(rng, 12),
            tax_id: digits(rng, 9),
            roles: Vec::new(),
        };

        let default_role = self
            .catalog
            .default_role_for_department(Some(department_name))
            .ok_or_else(|| {
                SapMockError::no_roles(format!(
                    "No master role available for department {}",
                    department_name
                ))
            })?;
        employee.assign_role(default_role.role_id.clone());

        // Some employees carry a second role on top of the departmental one.
        if rng.gen_bool(0.5) {
            if let Some(admin) = self.catalog.get(&RoleId::new("ADMIN")) {
                employee.assign_role(admin.role_id.clone());
            }
        }

        Ok(employee)
    }
}

fn days_ago(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}

fn digits(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0u8..10)))
        .collect()
}

fn company_email(first_name: &str, last_name: &str) -> String {
    format!(
        "{}.{}@company.com",
        ascii_slug(first_name),
        ascii_slug(last_name)
    )
}

fn ascii_slug(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_ascii_lowercase()
}

fn street_address(rng: &mut impl Rng) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city: String = CityName().fake_with_rng(rng);
    format!("{} {}, {}", number, street, city)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
