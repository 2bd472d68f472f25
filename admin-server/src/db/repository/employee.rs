//! Employee Repository

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::EmployeeStatus;

use super::{RepoError, RepoResult};
use crate::db::models::{Employee, NewEmployee};

/// Profile fields overwritten by an update
#[derive(Debug, Clone)]
pub struct EmployeeProfile {
    pub username: String,
    pub name: String,
    pub phone: String,
    pub sex: String,
    pub id_number: String,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Employee>,
    next_id: i64,
}

impl Table {
    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|e| e.username == username && Some(e.id) != except)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeRepository {
    table: Arc<RwLock<Table>>,
}

impl EmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find employee by id
    pub fn find_by_id(&self, id: i64) -> Option<Employee> {
        self.table.read().rows.get(&id).cloned()
    }

    /// Find employee by username
    pub fn find_by_username(&self, username: &str) -> Option<Employee> {
        self.table
            .read()
            .rows
            .values()
            .find(|e| e.username == username)
            .cloned()
    }

    /// Insert a new employee, assigning the next id
    ///
    /// The uniqueness check and the insert happen under one write lock.
    pub fn create(&self, data: NewEmployee) -> RepoResult<Employee> {
        let mut table = self.table.write();
        if table.username_taken(&data.username, None) {
            return Err(RepoError::Duplicate(format!(
                "{} already exists",
                data.username
            )));
        }

        table.next_id += 1;
        let employee = Employee {
            id: table.next_id,
            username: data.username,
            name: data.name,
            password: data.password,
            phone: data.phone,
            sex: data.sex,
            id_number: data.id_number,
            status: data.status,
            create_time: data.create_time,
            update_time: data.create_time,
            create_user: data.create_user,
            update_user: data.create_user,
        };
        table.rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    /// Overwrite profile fields and audit columns
    pub fn update_profile(
        &self,
        id: i64,
        profile: EmployeeProfile,
        now: i64,
        operator: i64,
    ) -> RepoResult<Employee> {
        let mut table = self.table.write();
        if !table.rows.contains_key(&id) {
            return Err(RepoError::NotFound(format!("Employee {} not found", id)));
        }
        if table.username_taken(&profile.username, Some(id)) {
            return Err(RepoError::Duplicate(format!(
                "{} already exists",
                profile.username
            )));
        }

        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;
        row.username = profile.username;
        row.name = profile.name;
        row.phone = profile.phone;
        row.sex = profile.sex;
        row.id_number = profile.id_number;
        row.update_time = now;
        row.update_user = Some(operator);
        Ok(row.clone())
    }

    /// Set account status
    pub fn set_status(
        &self,
        id: i64,
        status: EmployeeStatus,
        now: i64,
        operator: i64,
    ) -> RepoResult<Employee> {
        let mut table = self.table.write();
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;
        row.status = status;
        row.update_time = now;
        row.update_user = Some(operator);
        Ok(row.clone())
    }

    /// One page of employees, newest first
    ///
    /// `page` is 1-based. Returns the total number of matches alongside the page.
    pub fn page(&self, name: Option<&str>, page: u32, page_size: u32) -> (u64, Vec<Employee>) {
        let table = self.table.read();
        let mut matched: Vec<&Employee> = table
            .rows
            .values()
            .filter(|e| name.is_none_or(|n| e.name.contains(n)))
            .collect();
        matched.sort_by(|a, b| {
            b.create_time
                .cmp(&a.create_time)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matched.len() as u64;
        let offset = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
        let records = matched
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();
        (total, records)
    }

    pub fn count(&self) -> usize {
        self.table.read().rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(username: &str, name: &str, create_time: i64) -> NewEmployee {
        NewEmployee {
            username: username.to_string(),
            name: name.to_string(),
            password: "hash".to_string(),
            phone: "13800000000".to_string(),
            sex: "1".to_string(),
            id_number: "110101199001010011".to_string(),
            status: EmployeeStatus::Enabled,
            create_time,
            create_user: Some(1),
        }
    }

    fn profile(username: &str) -> EmployeeProfile {
        EmployeeProfile {
            username: username.to_string(),
            name: "Renamed".to_string(),
            phone: "13900000000".to_string(),
            sex: "0".to_string(),
            id_number: "110101199001010022".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let repo = EmployeeRepository::new();
        let a = repo.create(new_employee("a", "A", 1)).unwrap();
        let b = repo.create(new_employee("b", "B", 2)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.update_time, 2);
        assert_eq!(b.update_user, Some(1));
        assert_eq!(repo.find_by_username("b").unwrap().id, 2);
    }

    #[test]
    fn test_create_rejects_duplicate_username() {
        let repo = EmployeeRepository::new();
        repo.create(new_employee("a", "A", 1)).unwrap();
        let err = repo.create(new_employee("a", "Other", 2)).unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(msg) if msg == "a already exists"));
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn test_update_profile() {
        let repo = EmployeeRepository::new();
        let a = repo.create(new_employee("a", "A", 1)).unwrap();
        repo.create(new_employee("b", "B", 2)).unwrap();

        let updated = repo.update_profile(a.id, profile("a2"), 10, 99).unwrap();
        assert_eq!(updated.username, "a2");
        assert_eq!(updated.update_time, 10);
        assert_eq!(updated.update_user, Some(99));
        assert_eq!(updated.create_time, 1);

        // keeping its own username is fine, taking another's is not
        assert!(repo.update_profile(a.id, profile("a2"), 11, 99).is_ok());
        assert!(matches!(
            repo.update_profile(a.id, profile("b"), 12, 99),
            Err(RepoError::Duplicate(_))
        ));
        assert!(matches!(
            repo.update_profile(404, profile("x"), 12, 99),
            Err(RepoError::NotFound(_))
        ));
    }

    #[test]
    fn test_set_status() {
        let repo = EmployeeRepository::new();
        let a = repo.create(new_employee("a", "A", 1)).unwrap();
        let row = repo.set_status(a.id, EmployeeStatus::Disabled, 5, 1).unwrap();
        assert_eq!(row.status, EmployeeStatus::Disabled);
        assert!(!repo.find_by_id(a.id).unwrap().is_enabled());
        assert!(repo.set_status(404, EmployeeStatus::Enabled, 5, 1).is_err());
    }

    #[test]
    fn test_page_filters_and_orders() {
        let repo = EmployeeRepository::new();
        for i in 0..5 {
            repo.create(new_employee(&format!("u{}", i), &format!("Zhang {}", i), i))
                .unwrap();
        }
        repo.create(new_employee("li", "Li", 100)).unwrap();

        let (total, records) = repo.page(None, 1, 2);
        assert_eq!(total, 6);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].username, "li");
        assert_eq!(records[1].username, "u4");

        let (total, records) = repo.page(Some("Zhang"), 3, 2);
        assert_eq!(total, 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].username, "u0");

        let (total, records) = repo.page(Some("Zhang"), 9, 2);
        assert_eq!(total, 5);
        assert!(records.is_empty());
    }
}
