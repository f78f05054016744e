//! Employee directory - the registry of known employees.

use serde::{Deserialize, Serialize};

use crate::types::{EmployeeId, ValidationError};

/// Id assigned to the first employee added to a fresh directory.
pub const DEFAULT_FIRST_EMPLOYEE_ID: u64 = 101;

/// Largest id a directory may start counting from.
///
/// Ids are `first_id + position`, and a `Vec` cannot hold anywhere near
/// `u64::MAX - MAX_FIRST_EMPLOYEE_ID` employees, so assignment never overflows.
pub const MAX_FIRST_EMPLOYEE_ID: u64 = 4_294_967_295;

/// An employee known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Assigned by the directory, unique and increasing.
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// Free-text job role.
    pub role: String,
    /// The manager this employee reports to, if any.
    ///
    /// Not checked against the directory: dangling and self references are kept as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_to: Option<EmployeeId>,
}

impl Employee {
    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Append-only employee registry.
///
/// Employees are never mutated or removed once added.
#[derive(Debug, Clone)]
pub struct Directory {
    employees: Vec<Employee>,
    first_id: EmployeeId,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    /// Creates an empty directory whose first id is [`DEFAULT_FIRST_EMPLOYEE_ID`].
    pub const fn new() -> Self {
        Self {
            employees: Vec::new(),
            first_id: EmployeeId(DEFAULT_FIRST_EMPLOYEE_ID),
        }
    }

    /// Creates an empty directory whose first id is `first_id`.
    ///
    /// Rejects ids above [`MAX_FIRST_EMPLOYEE_ID`].
    pub fn with_first_id(first_id: EmployeeId) -> Result<Self, ValidationError> {
        if first_id.get() > MAX_FIRST_EMPLOYEE_ID {
            return Err(ValidationError::FirstIdOutOfRange {
                value: first_id.get(),
                max: MAX_FIRST_EMPLOYEE_ID,
            });
        }
        Ok(Self {
            employees: Vec::new(),
            first_id,
        })
    }

    /// Registers a new employee and returns it with its assigned id.
    pub fn add_employee(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
        reporting_to: Option<EmployeeId>,
    ) -> &Employee {
        let id = self.next_id();

        self.employees.push(Employee {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: role.into(),
            reporting_to,
        });
        tracing::info!(employee_id = %id, "employee added");

        &self.employees[self.employees.len() - 1]
    }

    /// All employees in insertion order.
    pub fn list_all_employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Whether an employee with this id has been added.
    pub fn is_valid_employee_id(&self, id: EmployeeId) -> bool {
        self.get(id).is_some()
    }

    /// Looks up an employee by id.
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        // Ids are assigned in increasing order, so insertion order is sorted.
        self.employees
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|idx| &self.employees[idx])
    }

    fn next_id(&self) -> EmployeeId {
        // Bounded by MAX_FIRST_EMPLOYEE_ID plus the Vec length limit.
        EmployeeId(self.first_id.0 + self.employees.len() as u64)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
