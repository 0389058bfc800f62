//! The shared employee record store.
//!
//! One store instance per process, injected by reference into the query and
//! authorization paths. Many readers, one writer: regeneration builds the new
//! collection off to the side and swaps it under the write lock, so readers
//! observe either the old collection or the new one, never a partial state.

use parking_lot::RwLock;
use tracing::debug;

use super::model::{Employee, EmployeeId};
use super::ID_BASE_OFFSET;

/// In-memory employee collection with stable insertion order.
#[derive(Debug)]
pub struct EmployeeStore {
    records: RwLock<Vec<Employee>>,
    base_offset: u32,
}

impl EmployeeStore {
    pub fn new(base_offset: u32) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            base_offset,
        }
    }

    /// Replace the entire collection. Destructive: all prior records are
    /// discarded in one atomic swap.
    pub fn replace_all(&self, records: Vec<Employee>) {
        let count = records.len();
        *self.records.write() = records;
        debug!(count, "Employee collection replaced");
    }

    /// Append one record, assigning the next sequential identifier
    /// (`base_offset + current max numeric id + 1`, zero-padded).
    ///
    /// Identifier assignment and insertion happen under one write lock so
    /// concurrent appends cannot race to the same id.
    pub fn append(&self, mut employee: Employee) -> Employee {
        let mut records = self.records.write();
        let max = records
            .iter()
            .filter_map(|e| e.employee_id.numeric())
            .max()
            .unwrap_or(self.base_offset);
        employee.employee_id = EmployeeId::from_sequence(max + 1);
        records.push(employee.clone());
        employee
    }

    /// Snapshot of the full collection in insertion order.
    pub fn all(&self) -> Vec<Employee> {
        self.records.read().clone()
    }

    /// Look up a record by identifier.
    pub fn by_id(&self, id: &str) -> Option<Employee> {
        self.records
            .read()
            .iter()
            .find(|e| e.employee_id.as_str() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new(ID_BASE_OFFSET)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str) -> Employee {
        Employee {
            employee_id: EmployeeId::new(id),
            ..Employee::default()
        }
    }

    #[test]
    fn append_assigns_sequential_ids_from_base_offset() {
        let store = EmployeeStore::default();
        let first = store.append(Employee::default());
        let second = store.append(Employee::default());
        assert_eq!(first.employee_id.as_str(), "10001");
        assert_eq!(second.employee_id.as_str(), "10002");
    }

    #[test]
    fn append_continues_from_current_max() {
        let store = EmployeeStore::default();
        store.replace_all(vec![employee("10005"), employee("10002")]);
        let appended = store.append(Employee::default());
        assert_eq!(appended.employee_id.as_str(), "10006");
    }

    #[test]
    fn append_ignores_non_numeric_ids() {
        let store = EmployeeStore::default();
        store.replace_all(vec![employee("EXTERN")]);
        let appended = store.append(Employee::default());
        assert_eq!(appended.employee_id.as_str(), "10001");
    }

    #[test]
    fn replace_all_is_destructive() {
        let store = EmployeeStore::default();
        store.replace_all(vec![employee("10001"), employee("10002")]);
        store.replace_all(vec![employee("10001")]);
        assert_eq!(store.len(), 1);
        assert!(store.by_id("10002").is_none());
    }

    #[test]
    fn by_id_finds_exact_match() {
        let store = EmployeeStore::default();
        store.replace_all(vec![employee("10001")]);
        assert!(store.by_id("10001").is_some());
        assert!(store.by_id("10001 ").is_none());
        assert!(store.by_id("99999").is_none());
    }

    #[test]
    fn all_preserves_insertion_order() {
        let store = EmployeeStore::default();
        store.replace_all(vec![employee("10003"), employee("10001"), employee("10002")]);
        let ids: Vec<_> = store
            .all()
            .into_iter()
            .map(|e| e.employee_id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["10003", "10001", "10002"]);
    }
}
