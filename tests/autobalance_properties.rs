use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rota_balancer::demo::{demo_staff, generate_preferences};
use rota_balancer::schedule::constraints::{consecutive_run_valid, weekly_window_count};
use rota_balancer::schedule::{
    audit, autobalance, CalendarDate, Horizon, PreferenceRequest, Schedule, ShiftAssignment,
    StaffId, StaffingLimits, Violation,
};

fn horizon(days: i64) -> Horizon {
    let start = CalendarDate::from_ymd(2024, 9, 17).unwrap();
    let end = start.naive() + chrono::Duration::days(days - 1);
    Horizon::from_range(start, end.into()).unwrap()
}

/// Ten staff on a two-on/two-off pattern, offsets chosen so that every day
/// has exactly five staff. Each full window holds 3-4 shifts and no run is
/// longer than two, so nothing may change.
fn settled_schedule(h: &Horizon) -> (Schedule, Vec<StaffId>) {
    let offsets = [0, 0, 0, 1, 1, 2, 2, 2, 3, 3];
    let roster: Vec<StaffId> = (0..offsets.len()).map(|i| StaffId::new(format!("n{i}"))).collect();
    let mut assignments = Vec::new();
    for (staff_id, offset) in roster.iter().zip(offsets) {
        for (position, date) in h.dates().iter().enumerate() {
            if (position + offset) % 4 < 2 {
                assignments.push(ShiftAssignment::new(staff_id.clone(), *date));
            }
        }
    }
    (Schedule::from_assignments(assignments), roster)
}

#[test]
fn settled_schedule_is_returned_unchanged() {
    let h = horizon(14);
    let limits = StaffingLimits::default();
    let (schedule, roster) = settled_schedule(&h);

    for date in h.dates() {
        assert_eq!(schedule.day_count(date), 5);
    }
    for staff_id in &roster {
        let dates = schedule.dates_for(staff_id);
        assert!(consecutive_run_valid(&dates, &h, &limits));
        for position in (limits.window_days - 1)..h.len() {
            assert!((3..=5).contains(&weekly_window_count(&dates, position, &h, &limits)));
        }
    }

    let outcome = autobalance(&schedule, &[], &h, &roster, &limits);
    assert_eq!(outcome.swaps, 0);
    assert_eq!(outcome.schedule, schedule);
    assert_eq!(outcome.daily_iterations, 1);
}

#[test]
fn swap_and_iteration_budgets_hold_for_random_drafts() {
    let h = horizon(21);
    let limits = StaffingLimits::default();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..40 {
        let staff_count = rng.gen_range(1..=12);
        let roster: Vec<StaffId> = (0..staff_count).map(|i| StaffId::new(format!("s{i}"))).collect();
        let mut preferences = Vec::new();
        for staff_id in &roster {
            for date in h.dates() {
                if rng.gen_bool(0.4) {
                    preferences.push(PreferenceRequest::new(staff_id.clone(), *date));
                }
            }
        }
        let draft = Schedule::from_preferences(&preferences);

        let outcome = autobalance(&draft, &preferences, &h, &roster, &limits);
        assert!(outcome.swaps <= limits.max_swaps);
        assert!(outcome.daily_iterations <= limits.max_daily_iterations);
        assert_eq!(draft, Schedule::from_preferences(&preferences));

        // Repair never creates a duplicate pair
        let mut seen = std::collections::HashSet::new();
        for assignment in outcome.schedule.iter() {
            assert!(seen.insert((assignment.staff_id.clone(), assignment.date)));
        }
    }
}

#[test]
fn swap_count_matches_the_change_in_assignments_when_only_adding() {
    let h = horizon(3);
    let limits = StaffingLimits::default();
    let roster = vec![StaffId::from("a"), StaffId::from("b")];

    let outcome = autobalance(&Schedule::new(), &[], &h, &roster, &limits);

    assert_eq!(outcome.swaps, 6);
    for date in h.dates() {
        let day = outcome.schedule.staff_on(date);
        assert_eq!(day.len(), 2);
        assert_ne!(day[0], day[1]);
    }
    // Days stay understaffed: visible only through the audit
    let violations = audit(&outcome.schedule, &h, &roster, &limits);
    let short_days = violations
        .iter()
        .filter(|v| matches!(v, Violation::DailyStaffing { count: 2, .. }))
        .count();
    assert_eq!(short_days, 3);
}

#[test]
fn demo_rota_repair_is_deterministic() {
    let h = horizon(21);
    let limits = StaffingLimits::default();
    let staff = demo_staff();
    let preferences = generate_preferences(&staff, &h, 42);
    let draft = Schedule::from_preferences(&preferences);
    let roster = draft.staff_ids();

    let first = autobalance(&draft, &preferences, &h, &roster, &limits);
    let second = autobalance(&draft, &preferences, &h, &roster, &limits);
    assert!(first.swaps <= limits.max_swaps);
    assert_eq!(first, second);
}
