use serde::{Deserialize, Serialize};

use crate::error::{Result, RotaError};

/// Staffing rules and repair budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffingLimits {
    /// Fewest staff allowed on one day
    pub min_daily_staff: usize,
    /// Most staff allowed on one day
    pub max_daily_staff: usize,
    /// Fewest shifts one staff member may work in a rolling window
    pub min_weekly_shifts: usize,
    /// Most shifts one staff member may work in a rolling window
    pub max_weekly_shifts: usize,
    /// Length of the rolling window in days
    pub window_days: usize,
    /// Longest allowed run of consecutive working days
    pub max_consecutive_days: usize,
    /// Add/remove operations allowed per repair
    pub max_swaps: usize,
    /// Outer iterations allowed for the daily staffing pass
    pub max_daily_iterations: usize,
}

impl Default for StaffingLimits {
    fn default() -> Self {
        Self {
            min_daily_staff: 3,
            max_daily_staff: 5,
            min_weekly_shifts: 3,
            max_weekly_shifts: 5,
            window_days: 7,
            max_consecutive_days: 3,
            max_swaps: 50,
            max_daily_iterations: 10,
        }
    }
}

impl StaffingLimits {
    pub fn validate(&self) -> Result<()> {
        if self.min_daily_staff > self.max_daily_staff {
            return Err(RotaError::InvalidConfig(format!(
                "min_daily_staff ({}) exceeds max_daily_staff ({})",
                self.min_daily_staff, self.max_daily_staff
            )));
        }
        if self.min_weekly_shifts > self.max_weekly_shifts {
            return Err(RotaError::InvalidConfig(format!(
                "min_weekly_shifts ({}) exceeds max_weekly_shifts ({})",
                self.min_weekly_shifts, self.max_weekly_shifts
            )));
        }
        if self.window_days == 0 {
            return Err(RotaError::InvalidConfig("window_days must be at least 1".into()));
        }
        if self.max_consecutive_days == 0 {
            return Err(RotaError::InvalidConfig(
                "max_consecutive_days must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn daily_range(&self) -> std::ops::RangeInclusive<usize> {
        self.min_daily_staff..=self.max_daily_staff
    }

    pub fn weekly_range(&self) -> std::ops::RangeInclusive<usize> {
        self.min_weekly_shifts..=self.max_weekly_shifts
    }
}

/// Swap and iteration counters for one repair call
#[derive(Debug, Clone)]
pub struct RepairBudget {
    swaps: usize,
    max_swaps: usize,
    daily_iterations: usize,
    max_daily_iterations: usize,
}

impl RepairBudget {
    pub fn new(limits: &StaffingLimits) -> Self {
        Self {
            swaps: 0,
            max_swaps: limits.max_swaps,
            daily_iterations: 0,
            max_daily_iterations: limits.max_daily_iterations,
        }
    }

    pub fn swaps(&self) -> usize {
        self.swaps
    }

    pub fn daily_iterations(&self) -> usize {
        self.daily_iterations
    }

    /// True while another add/remove may be made
    pub fn has_swaps_left(&self) -> bool {
        self.swaps < self.max_swaps
    }

    pub fn record_swap(&mut self) {
        self.swaps += 1;
    }

    /// Starts another daily-pass iteration if both budgets allow it
    pub fn begin_daily_iteration(&mut self) -> bool {
        if !self.has_swaps_left() || self.daily_iterations >= self.max_daily_iterations {
            return false;
        }
        self.daily_iterations += 1;
        true
    }
}
