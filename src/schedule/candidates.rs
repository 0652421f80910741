use std::ops::RangeInclusive;

use super::constraints::{consecutive_run_valid_with, weekly_window_valid};
use super::horizon::Horizon;
use super::limits::StaffingLimits;
use super::types::{CalendarDate, Schedule, StaffId};

/// Picks a staff member to add on `date`.
///
/// Scans the roster in order and returns the first member not yet working
/// `date` whose rolling window and run both stay valid with the new shift.
/// If nobody qualifies, the first member not yet working `date` is returned
/// anyway so the day can reach its minimum. `None` means everyone already works it.
pub fn select_add_for_day(
    schedule: &Schedule,
    date: &CalendarDate,
    horizon: &Horizon,
    roster: &[StaffId],
    limits: &StaffingLimits,
) -> Option<StaffId> {
    let available: Vec<&StaffId> = roster
        .iter()
        .filter(|staff_id| !schedule.contains(staff_id, date))
        .collect();

    let preferred = available.iter().find(|staff_id| {
        let dates = schedule.dates_for(staff_id);
        let mut with_candidate = dates.clone();
        with_candidate.push(*date);
        weekly_window_valid(&with_candidate, date, horizon, limits)
            && consecutive_run_valid_with(&dates, date, horizon, limits)
    });

    preferred.or(available.first()).map(|staff_id| (*staff_id).clone())
}

/// Picks who to take off an overstaffed day: the member with the most shifts
/// across the whole schedule, ties going to whoever comes first in the roster
pub fn select_remove_for_day(
    day_staff: &[&StaffId],
    schedule: &Schedule,
    roster: &[StaffId],
) -> Option<StaffId> {
    let roster_rank = |staff_id: &StaffId| {
        roster
            .iter()
            .position(|r| r == staff_id)
            .unwrap_or(usize::MAX)
    };

    let mut best: Option<(&StaffId, usize, usize)> = None;
    for &staff_id in day_staff {
        let total = schedule.shift_count(staff_id);
        let rank = roster_rank(staff_id);
        let better = match best {
            None => true,
            Some((_, best_total, best_rank)) => {
                total > best_total || (total == best_total && rank < best_rank)
            }
        };
        if better {
            best = Some((staff_id, total, rank));
        }
    }
    best.map(|(staff_id, _, _)| staff_id.clone())
}

/// Picks a date inside `window` to give `staff_id` an extra shift: the first
/// date whose day is below the daily cap, that the member does not already
/// work, and that keeps their run valid
pub fn select_add_for_week(
    schedule: &Schedule,
    staff_id: &StaffId,
    window: RangeInclusive<usize>,
    horizon: &Horizon,
    limits: &StaffingLimits,
) -> Option<CalendarDate> {
    let dates = schedule.dates_for(staff_id);
    window.filter_map(|position| horizon.get(position)).find(|date| {
        schedule.day_count(date) < limits.max_daily_staff
            && !schedule.contains(staff_id, date)
            && consecutive_run_valid_with(&dates, date, horizon, limits)
    })
}

/// Picks which of `staff_id`'s shifts inside `window` to drop: the one on the
/// most crowded day, earliest in schedule order on ties
pub fn select_remove_for_week(
    schedule: &Schedule,
    staff_id: &StaffId,
    window: RangeInclusive<usize>,
    horizon: &Horizon,
) -> Option<CalendarDate> {
    let mut best: Option<(CalendarDate, usize)> = None;
    for date in schedule.dates_for(staff_id) {
        let in_window = horizon
            .position(&date)
            .is_some_and(|position| window.contains(&position));
        if !in_window {
            continue;
        }
        let crowd = schedule.day_count(&date);
        if best.map_or(true, |(_, best_crowd)| crowd > best_crowd) {
            best = Some((date, crowd));
        }
    }
    best.map(|(date, _)| date)
}
