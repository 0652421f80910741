use serde::Serialize;

use super::fairness::{fairness_score, preferred_dates};
use super::horizon::Horizon;
use super::types::{CalendarDate, PreferenceRequest, Schedule, StaffMember};

/// How a horizon date looks from one staff member's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Requested and assigned
    Honored,
    /// Assigned without a request
    Assigned,
    /// Requested but not assigned
    NotHonored,
    NoAssignment,
}

impl DayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::Honored => "Honored",
            DayStatus::Assigned => "Assigned",
            DayStatus::NotHonored => "Not Honored",
            DayStatus::NoAssignment => "No Assignment",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayDetail {
    pub date: CalendarDate,
    pub has_shift: bool,
    pub had_preference: bool,
    pub status: DayStatus,
}

/// Per-staff summary used by the details views
#[derive(Debug, Clone, Serialize)]
pub struct StaffReport {
    pub staff: StaffMember,
    pub fairness: u32,
    pub total_shifts: usize,
    pub preference_count: usize,
    /// Assigned shifts that were requested
    pub honored: usize,
    pub days: Vec<DayDetail>,
}

impl StaffReport {
    pub fn build(
        staff: &StaffMember,
        schedule: &Schedule,
        preferences: &[PreferenceRequest],
        horizon: &Horizon,
    ) -> Self {
        let shifts = schedule.dates_for(&staff.id);
        let requested = preferred_dates(preferences, &staff.id);

        let days = horizon
            .dates()
            .iter()
            .map(|date| {
                let has_shift = shifts.contains(date);
                let had_preference = requested.contains(date);
                let status = match (has_shift, had_preference) {
                    (true, true) => DayStatus::Honored,
                    (true, false) => DayStatus::Assigned,
                    (false, true) => DayStatus::NotHonored,
                    (false, false) => DayStatus::NoAssignment,
                };
                DayDetail {
                    date: *date,
                    has_shift,
                    had_preference,
                    status,
                }
            })
            .collect();

        Self {
            staff: staff.clone(),
            fairness: fairness_score(&requested, &shifts),
            total_shifts: shifts.len(),
            preference_count: requested.len(),
            honored: shifts.iter().filter(|d| requested.contains(d)).count(),
            days,
        }
    }
}

/// Staff count for every horizon date
pub fn daily_staffing(schedule: &Schedule, horizon: &Horizon) -> Vec<(CalendarDate, usize)> {
    horizon
        .dates()
        .iter()
        .map(|date| (*date, schedule.day_count(date)))
        .collect()
}
