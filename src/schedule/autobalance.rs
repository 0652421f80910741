use tracing::{debug, info, warn};

use super::candidates::{
    select_add_for_day, select_add_for_week, select_remove_for_day, select_remove_for_week,
};
use super::constraints::{consecutive_run_valid_with, weekly_window_count};
use super::horizon::Horizon;
use super::limits::{RepairBudget, StaffingLimits};
use super::types::{PreferenceRequest, Schedule, StaffId};

/// Result of one repair call
#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutcome {
    pub schedule: Schedule,
    /// Adds plus removes across all three passes
    pub swaps: usize,
    /// Outer iterations used by the daily staffing pass
    pub daily_iterations: usize,
}

/// Repairs a draft schedule with three greedy passes: daily staffing, rolling
/// weekly windows, then consecutive runs.
///
/// Passes run once each, in that order, and never revisit an earlier pass. A
/// later pass may undo what an earlier one fixed; whatever is left unresolved
/// when a pass ends or the swap budget runs out is returned as-is.
pub struct Autobalancer<'a> {
    horizon: &'a Horizon,
    roster: &'a [StaffId],
    limits: &'a StaffingLimits,
}

impl<'a> Autobalancer<'a> {
    pub fn new(horizon: &'a Horizon, roster: &'a [StaffId], limits: &'a StaffingLimits) -> Self {
        Self {
            horizon,
            roster,
            limits,
        }
    }

    /// Repairs a private copy of `schedule`; the input is left untouched
    pub fn run(&self, schedule: &Schedule, preferences: &[PreferenceRequest]) -> RepairOutcome {
        info!(
            assignments = schedule.len(),
            staff = self.roster.len(),
            days = self.horizon.len(),
            "autobalancing schedule"
        );

        let mut working = schedule.clone();
        let mut budget = RepairBudget::new(self.limits);

        // Priority 1: 3-5 staff on every day
        self.fix_daily_staffing(&mut working, &mut budget);
        info!(
            swaps = budget.swaps(),
            iterations = budget.daily_iterations(),
            "daily staffing pass done"
        );

        // Priority 2: 3-5 shifts per staff member in every rolling window
        self.fix_weekly_windows(&mut working, &mut budget);
        info!(swaps = budget.swaps(), "weekly window pass done");

        // Priority 3: no run longer than the consecutive-day limit
        self.fix_consecutive_runs(&mut working, &mut budget);
        info!(swaps = budget.swaps(), "consecutive run pass done");

        for date in self.horizon.dates() {
            debug!(date = %date, staff = working.day_count(date), "final daily staffing");
        }

        let honored = preferences
            .iter()
            .filter(|p| working.contains(&p.staff_id, &p.date))
            .count();
        info!(
            swaps = budget.swaps(),
            assignments = working.len(),
            honored,
            requested = preferences.len(),
            "autobalance complete"
        );

        RepairOutcome {
            schedule: working,
            swaps: budget.swaps(),
            daily_iterations: budget.daily_iterations(),
        }
    }

    /// Rescans the horizon until a full scan changes nothing, the iteration cap
    /// is hit, or the swap budget runs out. At most one add or remove per day per scan.
    fn fix_daily_staffing(&self, schedule: &mut Schedule, budget: &mut RepairBudget) {
        let mut stable = false;
        while !stable && budget.begin_daily_iteration() {
            stable = true;

            for date in self.horizon.dates() {
                if !budget.has_swaps_left() {
                    break;
                }

                let day = schedule.staff_on(date);
                let count = day.len();

                if count < self.limits.min_daily_staff {
                    match select_add_for_day(schedule, date, self.horizon, self.roster, self.limits) {
                        Some(staff_id) => {
                            if schedule.assign(&staff_id, *date) {
                                budget.record_swap();
                                stable = false;
                                debug!(staff = %staff_id, date = %date, "added to understaffed day");
                            }
                        }
                        None => {
                            warn!(date = %date, staff = count, "could not find staff to add");
                        }
                    }
                } else if count > self.limits.max_daily_staff {
                    if let Some(staff_id) = select_remove_for_day(&day, schedule, self.roster) {
                        if schedule.unassign(&staff_id, date) {
                            budget.record_swap();
                            stable = false;
                            debug!(staff = %staff_id, date = %date, "removed from overstaffed day");
                        }
                    }
                }
            }
        }
    }

    /// One trailing window per horizon position, checked for every staff member.
    /// Overlapping windows are checked independently, so a shift can be touched
    /// more than once. Daily totals are not re-checked.
    fn fix_weekly_windows(&self, schedule: &mut Schedule, budget: &mut RepairBudget) {
        for position in 0..self.horizon.len() {
            let window = self.horizon.trailing_window(position, self.limits.window_days);

            for staff_id in self.roster {
                if !budget.has_swaps_left() {
                    return;
                }

                let dates = schedule.dates_for(staff_id);
                let count = weekly_window_count(&dates, position, self.horizon, self.limits);

                if count < self.limits.min_weekly_shifts {
                    if let Some(date) =
                        select_add_for_week(schedule, staff_id, window.clone(), self.horizon, self.limits)
                    {
                        if schedule.assign(staff_id, date) {
                            budget.record_swap();
                            debug!(staff = %staff_id, date = %date, count, "added shift to thin window");
                        }
                    }
                } else if count > self.limits.max_weekly_shifts {
                    if let Some(date) =
                        select_remove_for_week(schedule, staff_id, window.clone(), self.horizon)
                    {
                        if schedule.unassign(staff_id, &date) {
                            budget.record_swap();
                            debug!(staff = %staff_id, date = %date, count, "removed shift from full window");
                        }
                    }
                }
            }
        }
    }

    /// For every date and staff member, drops the shift on the date being
    /// examined when that date joins a run longer than allowed. This may not be
    /// the shift at the edge of the run.
    fn fix_consecutive_runs(&self, schedule: &mut Schedule, budget: &mut RepairBudget) {
        for date in self.horizon.dates() {
            for staff_id in self.roster {
                if !budget.has_swaps_left() {
                    return;
                }

                let dates = schedule.dates_for(staff_id);
                if consecutive_run_valid_with(&dates, date, self.horizon, self.limits) {
                    continue;
                }
                if schedule.unassign(staff_id, date) {
                    budget.record_swap();
                    debug!(staff = %staff_id, date = %date, "broke up long run");
                }
            }
        }
    }
}

/// Repairs `schedule` against `horizon` for the staff in `roster`
pub fn autobalance(
    schedule: &Schedule,
    preferences: &[PreferenceRequest],
    horizon: &Horizon,
    roster: &[StaffId],
    limits: &StaffingLimits,
) -> RepairOutcome {
    Autobalancer::new(horizon, roster, limits).run(schedule, preferences)
}
