use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RotaError;

/// Opaque staff identifier as handed out by the staff directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StaffId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StaffId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A day-granularity date, written as `YYYY-MM-DD` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day
    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Short label such as "Sep 17"
    pub fn short_label(&self) -> String {
        self.0.format("%b %-d").to_string()
    }

    /// Abbreviated weekday such as "Tue"
    pub fn weekday_label(&self) -> String {
        self.0.format("%a").to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDate {
    type Err = RotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        // Timestamps are reduced to their UTC calendar day
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self(dt.with_timezone(&Utc).date_naive()))
            .map_err(|_| RotaError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = RotaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A staff member from the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: StaffId,
    #[serde(alias = "full_name")]
    pub display_name: String,
}

/// A staff member working a date
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssignment {
    pub staff_id: StaffId,
    pub date: CalendarDate,
}

impl ShiftAssignment {
    pub fn new(staff_id: impl Into<StaffId>, date: CalendarDate) -> Self {
        Self {
            staff_id: staff_id.into(),
            date,
        }
    }
}

/// A staff member asking to work a date
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRequest {
    #[serde(alias = "profile_id")]
    pub staff_id: StaffId,
    pub date: CalendarDate,
}

impl PreferenceRequest {
    pub fn new(staff_id: impl Into<StaffId>, date: CalendarDate) -> Self {
        Self {
            staff_id: staff_id.into(),
            date,
        }
    }
}

/// Ordered collection of shift assignments.
///
/// Order is insertion order; removals take out the first matching pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    assignments: Vec<ShiftAssignment>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_assignments(assignments: Vec<ShiftAssignment>) -> Self {
        Self { assignments }
    }

    /// Draft schedule with one assignment per preference
    pub fn from_preferences(preferences: &[PreferenceRequest]) -> Self {
        let assignments = preferences
            .iter()
            .map(|p| ShiftAssignment::new(p.staff_id.clone(), p.date))
            .collect();
        Self { assignments }
    }

    pub fn assignments(&self) -> &[ShiftAssignment] {
        &self.assignments
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShiftAssignment> {
        self.assignments.iter()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn contains(&self, staff_id: &StaffId, date: &CalendarDate) -> bool {
        self.assignments
            .iter()
            .any(|a| &a.staff_id == staff_id && &a.date == date)
    }

    /// Adds `(staff_id, date)` unless that exact pair is already present.
    /// Returns whether the assignment was inserted.
    pub fn assign(&mut self, staff_id: &StaffId, date: CalendarDate) -> bool {
        if self.contains(staff_id, &date) {
            return false;
        }
        self.assignments
            .push(ShiftAssignment::new(staff_id.clone(), date));
        true
    }

    /// Removes the first `(staff_id, date)` assignment. Returns whether one existed.
    pub fn unassign(&mut self, staff_id: &StaffId, date: &CalendarDate) -> bool {
        match self
            .assignments
            .iter()
            .position(|a| &a.staff_id == staff_id && &a.date == date)
        {
            Some(index) => {
                self.assignments.remove(index);
                true
            }
            None => false,
        }
    }

    /// Staff working `date`, in schedule order
    pub fn staff_on(&self, date: &CalendarDate) -> Vec<&StaffId> {
        self.assignments
            .iter()
            .filter(|a| &a.date == date)
            .map(|a| &a.staff_id)
            .collect()
    }

    pub fn day_count(&self, date: &CalendarDate) -> usize {
        self.assignments.iter().filter(|a| &a.date == date).count()
    }

    /// Dates worked by `staff_id`, in schedule order
    pub fn dates_for(&self, staff_id: &StaffId) -> Vec<CalendarDate> {
        self.assignments
            .iter()
            .filter(|a| &a.staff_id == staff_id)
            .map(|a| a.date)
            .collect()
    }

    pub fn shift_count(&self, staff_id: &StaffId) -> usize {
        self.assignments
            .iter()
            .filter(|a| &a.staff_id == staff_id)
            .count()
    }

    /// Distinct staff ids in first-seen order
    pub fn staff_ids(&self) -> Vec<StaffId> {
        let mut seen = HashSet::new();
        self.assignments
            .iter()
            .filter(|a| seen.insert(&a.staff_id))
            .map(|a| a.staff_id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_plain_and_timestamp_dates() {
        assert_eq!(date("2024-09-17"), CalendarDate::from_ymd(2024, 9, 17).unwrap());
        assert_eq!(date("2024-09-17T23:30:00Z").to_string(), "2024-09-17");
        assert_eq!(date("2024-09-17T23:30:00-02:00").to_string(), "2024-09-18");
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["", "17/09/2024", "2024-13-01", "tomorrow"] {
            assert!(matches!(
                bad.parse::<CalendarDate>(),
                Err(RotaError::InvalidDate(_))
            ));
        }
    }

    #[test]
    fn preference_accepts_directory_field_name() {
        let pref: PreferenceRequest =
            serde_json::from_str(r#"{"profile_id":"n1","date":"2024-09-18","id":7}"#).unwrap();
        assert_eq!(pref.staff_id, StaffId::from("n1"));
        assert_eq!(pref.date, date("2024-09-18"));

        let member: StaffMember =
            serde_json::from_str(r#"{"id":"n1","full_name":"Ada Lovelace"}"#).unwrap();
        assert_eq!(member.display_name, "Ada Lovelace");
    }

    #[test]
    fn schedule_serializes_as_plain_array() {
        let schedule = Schedule::from_assignments(vec![ShiftAssignment::new("n1", date("2024-09-17"))]);
        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(json, r#"[{"staffId":"n1","date":"2024-09-17"}]"#);
    }

    #[test]
    fn assign_refuses_duplicates_and_unassign_removes_first_match() {
        let d = date("2024-09-17");
        let a = StaffId::from("a");
        let mut schedule = Schedule::new();
        assert!(schedule.assign(&a, d));
        assert!(!schedule.assign(&a, d));
        assert_eq!(schedule.len(), 1);
        assert!(schedule.unassign(&a, &d));
        assert!(!schedule.unassign(&a, &d));
        assert!(schedule.is_empty());
    }

    #[test]
    fn staff_ids_are_first_seen_order() {
        let d1 = date("2024-09-17");
        let d2 = date("2024-09-18");
        let schedule = Schedule::from_assignments(vec![
            ShiftAssignment::new("b", d1),
            ShiftAssignment::new("a", d1),
            ShiftAssignment::new("b", d2),
        ]);
        assert_eq!(schedule.staff_ids(), vec![StaffId::from("b"), StaffId::from("a")]);
        assert_eq!(schedule.dates_for(&StaffId::from("b")), vec![d1, d2]);
        assert_eq!(schedule.day_count(&d1), 2);
    }
}
