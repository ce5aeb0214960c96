//! Personnel roster - the employee directory consulted at login
//!
//! The data source delivers employees as a nested `head_of` tree. The
//! roster flattens that tree into an arena of actors plus a
//! supervisor-to-subordinate index, so there is no nested ownership and a
//! malformed record cannot introduce cycles. The hierarchy itself is
//! informational; login only needs the flat directory.

use thiserror::Error;
use tracing::debug;

use crate::core::loader::EmployeeRecord;
use crate::entities::actor::{Actor, ActorError};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("invalid employee record '{name}': {source}")]
    InvalidRecord { name: String, source: ActorError },
}

/// Flat directory of employees with the supervision forest on the side.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: Vec<Actor>,
    /// Index parallel to `employees`: the subordinates each employee heads
    reports: Vec<Vec<usize>>,
}

impl Roster {
    /// Flatten nested employee records, depth-first, supervisors before
    /// their subordinates. Refuses records that would construct an
    /// invalid employee.
    pub fn from_records(records: &[EmployeeRecord]) -> Result<Self, RosterError> {
        let mut roster = Roster::default();
        for record in records {
            roster.insert_tree(record)?;
        }
        debug!(employees = roster.len(), "personnel roster loaded");
        Ok(roster)
    }

    fn insert_tree(&mut self, record: &EmployeeRecord) -> Result<usize, RosterError> {
        let actor = Actor::employee(&record.user_name, &record.password).map_err(|source| {
            RosterError::InvalidRecord {
                name: record.user_name.clone(),
                source,
            }
        })?;

        let index = self.employees.len();
        self.employees.push(actor);
        self.reports.push(Vec::new());

        for subordinate in &record.head_of {
            let child = self.insert_tree(subordinate)?;
            self.reports[index].push(child);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// First employee with an exact name match.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.employees.iter().position(|e| e.is_named(name))
    }

    pub fn get(&self, index: usize) -> Option<&Actor> {
        self.employees.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Actor> {
        self.employees.get_mut(index)
    }

    /// Indices of the employees this employee heads.
    pub fn subordinates(&self, index: usize) -> &[usize] {
        self.reports.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.employees.iter()
    }
}
