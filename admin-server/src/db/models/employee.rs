//! Employee Model

use serde::{Deserialize, Serialize};
use shared::models::{EmployeeResponse, EmployeeStatus, MASKED_PASSWORD};

/// Stored employee record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub name: String,
    /// argon2 PHC string
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
    pub sex: String,
    pub id_number: String,
    pub status: EmployeeStatus,
    pub create_time: i64,
    pub update_time: i64,
    pub create_user: Option<i64>,
    pub update_user: Option<i64>,
}

/// Fields of a record about to be inserted (the store assigns the id)
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub username: String,
    pub name: String,
    pub password: String,
    pub phone: String,
    pub sex: String,
    pub id_number: String,
    pub status: EmployeeStatus,
    pub create_time: i64,
    pub create_user: Option<i64>,
}

impl Employee {
    pub fn is_enabled(&self) -> bool {
        self.status == EmployeeStatus::Enabled
    }

    /// API view with the password hash masked
    pub fn to_response(&self) -> EmployeeResponse {
        EmployeeResponse {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            password: MASKED_PASSWORD.to_string(),
            phone: self.phone.clone(),
            sex: self.sex.clone(),
            id_number: self.id_number.clone(),
            status: self.status,
            create_time: self.create_time,
            update_time: self.update_time,
            create_user: self.create_user,
            update_user: self.update_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_masks_password() {
        let employee = Employee {
            id: 1,
            username: "admin".to_string(),
            name: "Admin".to_string(),
            password: "$argon2id$v=19$...".to_string(),
            phone: "13800000000".to_string(),
            sex: "1".to_string(),
            id_number: "110101199001010011".to_string(),
            status: EmployeeStatus::Enabled,
            create_time: 0,
            update_time: 0,
            create_user: None,
            update_user: None,
        };

        assert_eq!(employee.to_response().password, MASKED_PASSWORD);
        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("password").is_none());
    }
}
