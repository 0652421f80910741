pub mod types;
pub mod horizon;
pub mod limits;
pub mod constraints;
pub mod candidates;
pub mod autobalance;
pub mod fairness;
pub mod report;

pub use types::{CalendarDate, PreferenceRequest, Schedule, ShiftAssignment, StaffId, StaffMember};
pub use horizon::Horizon;
pub use limits::{RepairBudget, StaffingLimits};
pub use constraints::{audit, Violation};
pub use autobalance::{autobalance, Autobalancer, RepairOutcome};
pub use fairness::{average_fairness, fairness_score, staff_fairness};
pub use report::{daily_staffing, StaffReport};
