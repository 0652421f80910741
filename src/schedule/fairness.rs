use std::collections::HashSet;

use super::types::{CalendarDate, PreferenceRequest, Schedule, StaffId, StaffMember};

/// Percentage of a staff member's assigned shifts that fall on a date they asked for.
///
/// The denominator is the number of assigned shifts, so a member whose every
/// shift was requested scores 100 even if other requests went unmet. No
/// requests, or no shifts, also score 100.
pub fn fairness_score(preferred_dates: &[CalendarDate], assigned_dates: &[CalendarDate]) -> u32 {
    if preferred_dates.is_empty() || assigned_dates.is_empty() {
        return 100;
    }
    let preferred: HashSet<&CalendarDate> = preferred_dates.iter().collect();
    let honored = assigned_dates.iter().filter(|d| preferred.contains(d)).count();
    (100.0 * honored as f64 / assigned_dates.len() as f64).round() as u32
}

/// Dates `staff_id` asked for
pub fn preferred_dates(preferences: &[PreferenceRequest], staff_id: &StaffId) -> Vec<CalendarDate> {
    preferences
        .iter()
        .filter(|p| &p.staff_id == staff_id)
        .map(|p| p.date)
        .collect()
}

/// Fairness of one staff member against the final schedule
pub fn staff_fairness(schedule: &Schedule, preferences: &[PreferenceRequest], staff_id: &StaffId) -> u32 {
    fairness_score(
        &preferred_dates(preferences, staff_id),
        &schedule.dates_for(staff_id),
    )
}

/// Rounded mean fairness over `staff`; `None` for an empty directory
pub fn average_fairness(
    schedule: &Schedule,
    preferences: &[PreferenceRequest],
    staff: &[StaffMember],
) -> Option<u32> {
    if staff.is_empty() {
        return None;
    }
    let total: u32 = staff
        .iter()
        .map(|member| staff_fairness(schedule, preferences, &member.id))
        .sum();
    Some((total as f64 / staff.len() as f64).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> CalendarDate {
        CalendarDate::from_ymd(2024, 9, day).unwrap()
    }

    #[test]
    fn no_preferences_scores_100() {
        assert_eq!(fairness_score(&[], &[d(17), d(18), d(19)]), 100);
    }

    #[test]
    fn no_assignments_scores_100() {
        assert_eq!(fairness_score(&[d(17), d(18)], &[]), 100);
    }

    #[test]
    fn denominator_is_assigned_shifts() {
        assert_eq!(fairness_score(&[d(17), d(18)], &[d(17), d(19)]), 50);
        assert_eq!(fairness_score(&[d(17), d(18), d(20), d(21)], &[d(17)]), 100);
        assert_eq!(fairness_score(&[d(17)], &[d(17), d(18), d(19)]), 33);
        assert_eq!(fairness_score(&[d(17), d(18)], &[d(17), d(18), d(19)]), 67);
    }

    #[test]
    fn duplicate_requests_do_not_inflate_the_score() {
        assert_eq!(fairness_score(&[d(17), d(17)], &[d(17), d(19)]), 50);
    }

    #[test]
    fn average_over_directory() {
        let prefs = vec![
            PreferenceRequest::new("a", d(17)),
            PreferenceRequest::new("b", d(18)),
        ];
        let schedule = Schedule::from_assignments(vec![
            crate::schedule::ShiftAssignment::new("a", d(17)),
            crate::schedule::ShiftAssignment::new("b", d(19)),
        ]);
        let staff = vec![
            StaffMember { id: "a".into(), display_name: "A".into() },
            StaffMember { id: "b".into(), display_name: "B".into() },
        ];
        assert_eq!(staff_fairness(&schedule, &prefs, &StaffId::from("b")), 0);
        assert_eq!(average_fairness(&schedule, &prefs, &staff), Some(50));
        assert_eq!(average_fairness(&schedule, &prefs, &[]), None);
    }
}
