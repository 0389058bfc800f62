//! The restricted OData `$filter` grammar and its evaluator.
//!
//! Grammar: clauses joined by the literal separator `" and "`, each clause a
//! `field operator literal` triple with single quotes stripped from the
//! literal. Supported operators are `eq`, `le`, `lt`, `ge`, `gt`; there is no
//! `or`, grouping, or negation, and the grammar is deliberately permissive:
//!
//! - a clause with no recognized operator token is skipped entirely (it
//!   filters nothing out),
//! - a clause naming an unknown field matches no record (it filters
//!   everything out),
//! - an unparseable comparison literal matches no record.
//!
//! These three behaviors are load-bearing compatibility contracts, not bugs.
//!
//! Parsing produces a typed [`Clause`] list once per request; evaluation is a
//! pure predicate per record driven by a single field registry shared by the
//! equality and ordering paths.

use chrono::NaiveDate;

use crate::directory::model::Employee;

// ═══════════════════════════════════════════════════════════════════════════════
// Operators
// ═══════════════════════════════════════════════════════════════════════════════

/// A filter clause operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Le,
    Lt,
    Ge,
    Gt,
}

impl FilterOp {
    /// Operator scan order. A clause is classified by the first operator
    /// token found in this order; `"a le b gt c"` is an `le` clause.
    pub const SCAN_ORDER: [FilterOp; 5] = [
        FilterOp::Eq,
        FilterOp::Le,
        FilterOp::Lt,
        FilterOp::Ge,
        FilterOp::Gt,
    ];

    /// The operator token as it appears in a filter string, spaces included.
    pub const fn token(self) -> &'static str {
        match self {
            FilterOp::Eq => " eq ",
            FilterOp::Le => " le ",
            FilterOp::Lt => " lt ",
            FilterOp::Ge => " ge ",
            FilterOp::Gt => " gt ",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Field registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Comparison semantics of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// Case-sensitive string equality; no ordering.
    Exact,
    /// Case-insensitive string equality; no ordering.
    Text,
    /// Equality on the ISO `YYYY-MM-DD` string form; calendar-date ordering.
    Date,
    /// Case-sensitive string equality; integer ordering.
    Numeric,
}

enum FieldValue<'a> {
    Str(&'a str),
    Date(Option<NaiveDate>),
}

struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    get: fn(&Employee) -> FieldValue<'_>,
}

/// The one table both dispatch paths consult. Equality on
/// department/bankAccount/taxId is exact string comparison while their
/// ordering parses integers; `'0099'` eq-matches only the literal string but
/// numeric-compares equal to 99. That asymmetry is inherited behavior.
const REGISTRY: &[FieldSpec] = &[
    FieldSpec {
        name: "employeeId",
        kind: FieldKind::Exact,
        get: |e| FieldValue::Str(e.employee_id.as_str()),
    },
    FieldSpec {
        name: "firstName",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.first_name),
    },
    FieldSpec {
        name: "lastName",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.last_name),
    },
    FieldSpec {
        name: "middleName",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.middle_name),
    },
    FieldSpec {
        name: "gender",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.gender),
    },
    FieldSpec {
        name: "nationality",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.nationality),
    },
    FieldSpec {
        name: "maritalStatus",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.marital_status),
    },
    FieldSpec {
        name: "position",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.position),
    },
    FieldSpec {
        name: "jobTitle",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.job_title),
    },
    FieldSpec {
        name: "department",
        kind: FieldKind::Numeric,
        get: |e| FieldValue::Str(&e.department),
    },
    FieldSpec {
        name: "departmentName",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.department_name),
    },
    FieldSpec {
        name: "workEmail",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.work_email),
    },
    FieldSpec {
        name: "workPhone",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.work_phone),
    },
    FieldSpec {
        name: "mobilePhone",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.mobile_phone),
    },
    FieldSpec {
        name: "address",
        kind: FieldKind::Text,
        get: |e| FieldValue::Str(&e.address),
    },
    FieldSpec {
        name: "bankAccount",
        kind: FieldKind::Numeric,
        get: |e| FieldValue::Str(&e.bank_account),
    },
    FieldSpec {
        name: "taxId",
        kind: FieldKind::Numeric,
        get: |e| FieldValue::Str(&e.tax_id),
    },
    FieldSpec {
        name: "birthDate",
        kind: FieldKind::Date,
        get: |e| FieldValue::Date(e.birth_date),
    },
    FieldSpec {
        name: "hireDate",
        kind: FieldKind::Date,
        get: |e| FieldValue::Date(e.hire_date),
    },
    FieldSpec {
        name: "terminationDate",
        kind: FieldKind::Date,
        get: |e| FieldValue::Date(e.termination_date),
    },
];

fn lookup(field: &str) -> Option<&'static FieldSpec> {
    REGISTRY.iter().find(|spec| spec.name == field)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════════════

/// One parsed `field operator literal` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: String,
    pub op: FilterOp,
    pub literal: String,
}

/// Parse a raw `$filter` string into its clause list.
///
/// Malformed clauses (no recognized operator token) are dropped; an empty or
/// whitespace-only filter yields an empty clause list, meaning "include
/// everything".
pub fn parse_filter(filter: &str) -> Vec<Clause> {
    filter.split(" and ").filter_map(parse_clause).collect()
}

fn parse_clause(raw: &str) -> Option<Clause> {
    let raw = raw.trim();
    let op = FilterOp::SCAN_ORDER
        .into_iter()
        .find(|op| raw.contains(op.token()))?;
    let (field, literal) = raw.split_once(op.token())?;
    Some(Clause {
        field: field.trim().to_string(),
        op,
        literal: literal.replace('\'', "").trim().to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Evaluation
// ═══════════════════════════════════════════════════════════════════════════════

impl Clause {
    /// Pure include/exclude decision for one record.
    pub fn matches(&self, employee: &Employee) -> bool {
        let Some(spec) = lookup(&self.field) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => self.matches_eq(spec, employee),
            op => self.matches_ordering(spec, op, employee),
        }
    }

    fn matches_eq(&self, spec: &FieldSpec, employee: &Employee) -> bool {
        match (spec.kind, (spec.get)(employee)) {
            (FieldKind::Exact | FieldKind::Numeric, FieldValue::Str(value)) => {
                value == self.literal
            }
            (FieldKind::Text, FieldValue::Str(value)) => value.eq_ignore_ascii_case(&self.literal),
            (FieldKind::Date, FieldValue::Date(value)) => {
                value.is_some_and(|d| d.to_string() == self.literal)
            }
            _ => false,
        }
    }

    fn matches_ordering(&self, spec: &FieldSpec, op: FilterOp, employee: &Employee) -> bool {
        match (spec.kind, (spec.get)(employee)) {
            (FieldKind::Date, FieldValue::Date(value)) => {
                let Some(date) = value else { return false };
                let Ok(target) = self.literal.parse::<NaiveDate>() else {
                    return false;
                };
                ordering_holds(op, date, target)
            }
            (FieldKind::Numeric, FieldValue::Str(value)) => {
                let (Ok(field_num), Ok(target_num)) =
                    (value.parse::<i64>(), self.literal.parse::<i64>())
                else {
                    return false;
                };
                ordering_holds(op, field_num, target_num)
            }
            // Free-text and identifier fields have no ordering semantics.
            _ => false,
        }
    }
}

fn ordering_holds<T: Ord>(op: FilterOp, value: T, target: T) -> bool {
    match op {
        FilterOp::Gt => value > target,
        FilterOp::Ge => value >= target,
        FilterOp::Lt => value < target,
        FilterOp::Le => value <= target,
        FilterOp::Eq => value == target,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::model::EmployeeId;

    fn employee() -> Employee {
        Employee {
            employee_id: EmployeeId::new("10001"),
            first_name: "Alice".into(),
            last_name: "Meyer".into(),
            department: "1001".into(),
            department_name: "IT".into(),
            hire_date: NaiveDate::from_ymd_opt(2021, 6, 15),
            ..Employee::default()
        }
    }

    #[test]
    fn parses_clauses_joined_by_and() {
        let clauses = parse_filter("firstName eq 'Alice' and department gt 1000");
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].field, "firstName");
        assert_eq!(clauses[0].op, FilterOp::Eq);
        assert_eq!(clauses[0].literal, "Alice");
        assert_eq!(clauses[1].op, FilterOp::Gt);
        assert_eq!(clauses[1].literal, "1000");
    }

    #[test]
    fn clause_without_operator_is_dropped() {
        assert!(parse_filter("firstName").is_empty());
        assert!(parse_filter("").is_empty());
        assert_eq!(parse_filter("firstName and lastName eq 'Meyer'").len(), 1);
    }

    #[test]
    fn first_operator_token_in_scan_order_wins() {
        // Both " le " and " gt " occur; le comes first in the scan order.
        let clause = parse_clause("hireDate le 2022-01-01 gt x").unwrap();
        assert_eq!(clause.op, FilterOp::Le);
        assert_eq!(clause.field, "hireDate");
        // eq outranks everything, even when an ordering token appears first
        // in the string itself.
        let clause = parse_clause("position gt eldest eq 'Senior gt Manager'").unwrap();
        assert_eq!(clause.op, FilterOp::Eq);
    }

    #[test]
    fn quotes_are_stripped_before_trimming() {
        let clause = parse_clause("firstName eq ' Alice '").unwrap();
        assert_eq!(clause.literal, "Alice");
    }

    #[test]
    fn text_equality_is_case_insensitive() {
        let e = employee();
        assert!(parse_clause("firstName eq 'ALICE'").unwrap().matches(&e));
        assert!(!parse_clause("firstName eq 'Alic'").unwrap().matches(&e));
    }

    #[test]
    fn identifier_equality_is_case_sensitive_exact() {
        let e = employee();
        assert!(parse_clause("employeeId eq '10001'").unwrap().matches(&e));
        assert!(!parse_clause("employeeId eq '1001'").unwrap().matches(&e));
    }

    #[test]
    fn unknown_field_matches_nothing() {
        assert!(!parse_clause("shoeSize eq '42'").unwrap().matches(&employee()));
    }

    #[test]
    fn date_equality_uses_iso_string_form() {
        let e = employee();
        assert!(parse_clause("hireDate eq 2021-06-15").unwrap().matches(&e));
        assert!(!parse_clause("hireDate eq 2021-6-15").unwrap().matches(&e));
    }

    #[test]
    fn date_ordering_is_calendar_based() {
        let e = employee();
        assert!(parse_clause("hireDate gt 2021-06-14").unwrap().matches(&e));
        assert!(!parse_clause("hireDate gt 2021-06-15").unwrap().matches(&e));
        assert!(parse_clause("hireDate ge 2021-06-15").unwrap().matches(&e));
        assert!(parse_clause("hireDate le 2021-06-15").unwrap().matches(&e));
        assert!(!parse_clause("hireDate lt 2021-06-15").unwrap().matches(&e));
    }

    #[test]
    fn null_date_never_matches() {
        let e = employee();
        assert!(!parse_clause("terminationDate le 2999-12-31").unwrap().matches(&e));
        assert!(!parse_clause("terminationDate eq 2021-06-15").unwrap().matches(&e));
    }

    #[test]
    fn unparseable_literals_never_match() {
        let e = employee();
        assert!(!parse_clause("hireDate gt yesterday").unwrap().matches(&e));
        assert!(!parse_clause("department gt ten").unwrap().matches(&e));
    }

    #[test]
    fn numeric_ordering_parses_integers() {
        let e = employee();
        assert!(parse_clause("department gt 1000").unwrap().matches(&e));
        assert!(parse_clause("department le 1001").unwrap().matches(&e));
        assert!(!parse_clause("department lt 1001").unwrap().matches(&e));
    }

    #[test]
    fn text_fields_have_no_ordering() {
        assert!(!parse_clause("firstName gt 'A'").unwrap().matches(&employee()));
        assert!(!parse_clause("employeeId ge '10000'").unwrap().matches(&employee()));
    }

    #[test]
    fn leading_zeros_split_equality_and_ordering() {
        let mut e = employee();
        e.department = "0099".into();
        // Exact string equality only matches the literal spelling.
        assert!(parse_clause("department eq '0099'").unwrap().matches(&e));
        assert!(!parse_clause("department eq '99'").unwrap().matches(&e));
        // Integer ordering treats both spellings as 99.
        assert!(parse_clause("department le 99").unwrap().matches(&e));
        assert!(parse_clause("department ge 99").unwrap().matches(&e));
    }
}
