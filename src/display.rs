use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::schedule::{
    daily_staffing, CalendarDate, Horizon, PreferenceRequest, Schedule, StaffMember, StaffReport,
    Violation,
};

/// Name shown for a staff id, falling back to the id itself
pub fn staff_name<'a>(staff: &'a [StaffMember], staff_id: &'a str) -> &'a str {
    staff
        .iter()
        .find(|m| m.id.as_str() == staff_id)
        .map(|m| m.display_name.as_str())
        .unwrap_or(staff_id)
}

/// One grid row per staff member: `X` for a shift, `.` for a day off, with a
/// `|` after every seventh day
pub fn format_schedule_grid(schedule: &Schedule, staff: &[StaffMember], horizon: &Horizon) -> Vec<String> {
    let name_width = staff
        .iter()
        .map(|m| m.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut lines = Vec::new();
    let header: String = horizon
        .dates()
        .iter()
        .enumerate()
        .map(|(i, date)| format!("{}{}", day_initial(date), week_separator(i)))
        .collect();
    lines.push(format!("{:<width$} {}", "Staff", header, width = name_width));

    for member in staff {
        let row: String = horizon
            .dates()
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let mark = if schedule.contains(&member.id, date) { 'X' } else { '.' };
                format!("{}{}", mark, week_separator(i))
            })
            .collect();
        lines.push(format!(
            "{:<width$} {} ({} shifts)",
            member.display_name,
            row,
            schedule.shift_count(&member.id),
            width = name_width
        ));
    }

    let counts: String = daily_staffing(schedule, horizon)
        .iter()
        .enumerate()
        .map(|(i, (_, n))| format!("{}{}", count_digit(*n), week_separator(i)))
        .collect();
    lines.push(format!("{:<width$} {}", "Total", counts, width = name_width));
    lines
}

fn day_initial(date: &CalendarDate) -> char {
    date.weekday_label().chars().next().unwrap_or('?')
}

fn week_separator(index: usize) -> &'static str {
    if (index + 1) % 7 == 0 {
        "|"
    } else {
        ""
    }
}

fn count_digit(n: usize) -> char {
    std::char::from_digit(n.min(9) as u32, 10).unwrap_or('+')
}

/// Writes the grid to `path` under a heading
pub fn write_schedule_to_file(
    title: &str,
    schedule: &Schedule,
    staff: &[StaffMember],
    horizon: &Horizon,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;
    writeln!(file, "** {} **", title)?;
    writeln!(file, "{} - {}", horizon.start(), horizon.end())?;
    for line in format_schedule_grid(schedule, staff, horizon) {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

/// Prints the staffing count for every day
pub fn print_daily_staffing(schedule: &Schedule, horizon: &Horizon) {
    println!("\nDaily staffing:");
    for (date, count) in daily_staffing(schedule, horizon) {
        println!(
            "  {} {:<6} {} staff",
            date.weekday_label(),
            date.short_label(),
            count
        );
    }
}

/// Prints the grid plus per-staff fairness
pub fn print_schedule(
    title: &str,
    schedule: &Schedule,
    staff: &[StaffMember],
    preferences: &[PreferenceRequest],
    horizon: &Horizon,
) {
    println!("\n=== {} ===", title);
    println!("Total assignments: {}", schedule.len());
    for line in format_schedule_grid(schedule, staff, horizon) {
        println!("  {}", line);
    }

    println!("\nFairness by staff member:");
    for member in staff {
        let report = StaffReport::build(member, schedule, preferences, horizon);
        println!(
            "  {} -> {}% ({}/{} shifts requested, {} requests)",
            member.display_name,
            report.fairness,
            report.honored,
            report.total_shifts,
            report.preference_count
        );
    }
}

/// Prints whatever the repair left unresolved
pub fn print_violations(violations: &[Violation], staff: &[StaffMember]) {
    if violations.is_empty() {
        println!("\nNo remaining violations.");
        return;
    }
    println!("\n⚠️  Remaining violations ({}):", violations.len());
    for violation in violations {
        match violation {
            Violation::DailyStaffing { date, count } => {
                println!("  - {} has {} staff", date, count);
            }
            Violation::WeeklyShifts {
                staff_id,
                window_end,
                count,
            } => {
                println!(
                    "  - {} works {} shifts in the window ending {}",
                    staff_name(staff, staff_id.as_str()),
                    count,
                    window_end
                );
            }
            Violation::ConsecutiveRun { staff_id, length } => {
                println!(
                    "  - {} works {} days in a row",
                    staff_name(staff, staff_id.as_str()),
                    length
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ShiftAssignment;

    #[test]
    fn grid_marks_shifts_and_weeks() {
        let horizon = Horizon::from_range("2024-09-17".parse().unwrap(), "2024-09-24".parse().unwrap()).unwrap();
        let staff = vec![StaffMember {
            id: "n1".into(),
            display_name: "Ada".into(),
        }];
        let schedule = Schedule::from_assignments(vec![
            ShiftAssignment::new("n1", horizon.get(0).unwrap()),
            ShiftAssignment::new("n1", horizon.get(7).unwrap()),
        ]);

        let lines = format_schedule_grid(&schedule, &staff, &horizon);
        assert_eq!(lines[0], "Staff TWTFSSM|T");
        assert_eq!(lines[1], "Ada   X......|X (2 shifts)");
        assert_eq!(lines[2], "Total 1000000|1");
    }

    #[test]
    fn unknown_staff_falls_back_to_id() {
        assert_eq!(staff_name(&[], "n9"), "n9");
    }
}
