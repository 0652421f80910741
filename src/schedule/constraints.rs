use serde::Serialize;

use super::horizon::Horizon;
use super::limits::StaffingLimits;
use super::types::{CalendarDate, Schedule, StaffId};

/// Checks that a day has between `min_daily_staff` and `max_daily_staff` assignments
pub fn daily_count_valid<T>(day_assignments: &[T], limits: &StaffingLimits) -> bool {
    limits.daily_range().contains(&day_assignments.len())
}

/// Number of `staff_dates` inside the trailing window ending at `position`.
/// Dates outside the horizon never count.
pub fn weekly_window_count(
    staff_dates: &[CalendarDate],
    position: usize,
    horizon: &Horizon,
    limits: &StaffingLimits,
) -> usize {
    let window = horizon.trailing_window(position, limits.window_days);
    staff_dates
        .iter()
        .filter_map(|d| horizon.position(d))
        .filter(|p| window.contains(p))
        .count()
}

/// Checks the rolling window ending at `date`. Windows near the start of the
/// horizon are shorter than `window_days` and must still hold the minimum.
pub fn weekly_window_valid(
    staff_dates: &[CalendarDate],
    date: &CalendarDate,
    horizon: &Horizon,
    limits: &StaffingLimits,
) -> bool {
    match horizon.position(date) {
        Some(position) => limits
            .weekly_range()
            .contains(&weekly_window_count(staff_dates, position, horizon, limits)),
        None => false,
    }
}

/// Longest run of consecutive horizon positions among `dates`.
///
/// Two entries at the same position break the run.
pub fn longest_consecutive_run(dates: &[CalendarDate], horizon: &Horizon) -> usize {
    let mut positions: Vec<usize> = dates.iter().filter_map(|d| horizon.position(d)).collect();
    positions.sort_unstable();

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<usize> = None;
    for position in positions {
        run = match previous {
            Some(p) if position == p + 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(position);
    }
    longest
}

/// Checks that no run in `dates` is longer than `max_consecutive_days`
pub fn consecutive_run_valid(dates: &[CalendarDate], horizon: &Horizon, limits: &StaffingLimits) -> bool {
    longest_consecutive_run(dates, horizon) <= limits.max_consecutive_days
}

/// Same as [`consecutive_run_valid`] on `staff_dates` combined with `candidate`
pub fn consecutive_run_valid_with(
    staff_dates: &[CalendarDate],
    candidate: &CalendarDate,
    horizon: &Horizon,
    limits: &StaffingLimits,
) -> bool {
    let mut combined = staff_dates.to_vec();
    combined.push(*candidate);
    consecutive_run_valid(&combined, horizon, limits)
}

/// A rule broken by a finished schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    DailyStaffing {
        date: CalendarDate,
        count: usize,
    },
    WeeklyShifts {
        staff_id: StaffId,
        window_end: CalendarDate,
        count: usize,
    },
    ConsecutiveRun {
        staff_id: StaffId,
        length: usize,
    },
}

/// Re-runs every check over `schedule`; the only way to see what a repair left unresolved
pub fn audit(
    schedule: &Schedule,
    horizon: &Horizon,
    roster: &[StaffId],
    limits: &StaffingLimits,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for date in horizon.dates() {
        let day = schedule.staff_on(date);
        if !daily_count_valid(&day, limits) {
            violations.push(Violation::DailyStaffing {
                date: *date,
                count: day.len(),
            });
        }
    }

    for staff_id in roster {
        let dates = schedule.dates_for(staff_id);
        for (position, window_end) in horizon.dates().iter().enumerate() {
            let count = weekly_window_count(&dates, position, horizon, limits);
            if !limits.weekly_range().contains(&count) {
                violations.push(Violation::WeeklyShifts {
                    staff_id: staff_id.clone(),
                    window_end: *window_end,
                    count,
                });
            }
        }

        let length = longest_consecutive_run(&dates, horizon);
        if length > limits.max_consecutive_days {
            violations.push(Violation::ConsecutiveRun {
                staff_id: staff_id.clone(),
                length,
            });
        }
    }

    violations
}
