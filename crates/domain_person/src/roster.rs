//! In-memory roster of registered people
//!
//! An ordered, append-only sequence. The only other mutation is removal by
//! position, which shifts later entries down by one.

use chrono::NaiveDate;
use serde::Serialize;

use crate::person::PersonRecord;

/// A roster entry as presented to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    /// Current position in the roster
    pub index: usize,
    /// Age on the day the entry was read
    pub age: Option<i32>,
    pub address_line: String,
    #[serde(flatten)]
    pub record: PersonRecord,
}

/// Ordered collection of accepted person records
#[derive(Debug, Clone, Default)]
pub struct Roster {
    people: Vec<PersonRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its index
    pub fn push(&mut self, record: PersonRecord) -> usize {
        self.people.push(record);
        self.people.len() - 1
    }

    /// Removes the record at `index`.
    ///
    /// Returns `None` and leaves the roster unchanged when `index` is out
    /// of range.
    pub fn remove(&mut self, index: usize) -> Option<PersonRecord> {
        (index < self.people.len()).then(|| self.people.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&PersonRecord> {
        self.people.get(index)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonRecord> {
        self.people.iter()
    }

    /// Builds the entry for `index` with ages computed on `today`
    pub fn entry(&self, index: usize, today: NaiveDate) -> Option<RosterEntry> {
        self.get(index).map(|record| RosterEntry {
            index,
            age: record.age_on(today),
            address_line: record.address.format(),
            record: record.clone(),
        })
    }

    /// Lists all entries with ages computed on `today`
    pub fn entries(&self, today: NaiveDate) -> Vec<RosterEntry> {
        (0..self.len())
            .filter_map(|index| self.entry(index, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_push_returns_index() {
        let mut roster = Roster::new();
        assert_eq!(roster.push(named("Ana")), 0);
        assert_eq!(roster.push(named("Bruno")), 1);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut roster = Roster::new();
        roster.push(named("Ana"));
        roster.push(named("Bruno"));
        roster.push(named("Carla"));

        let removed = roster.remove(1).unwrap();
        assert_eq!(removed.name, "Bruno");

        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut roster = Roster::new();
        roster.push(named("Ana"));
        assert!(roster.remove(1).is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_entries_include_age() {
        let mut roster = Roster::new();
        let mut record = named("Ana");
        record.birth_date = NaiveDate::from_ymd_opt(2000, 6, 15);
        roster.push(record);

        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let entries = roster.entries(today);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].index, 0);
        assert_eq!(entries[0].age, Some(23));
    }
}
