use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rota_balancer::config::{BalancerConfig, RosterSource};
use rota_balancer::demo::{demo_staff, generate_preferences};
use rota_balancer::display::{print_daily_staffing, print_schedule, print_violations, write_schedule_to_file};
use rota_balancer::export::export_schedule_csv;
use rota_balancer::parser::{load_preferences, load_staff};
use rota_balancer::schedule::{
    audit, autobalance, average_fairness, PreferenceRequest, Schedule, StaffId, StaffMember,
};
use rota_balancer::web;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config_path = std::env::var("ROTA_CONFIG").unwrap_or_else(|_| "rota.toml".to_string());
    let config = BalancerConfig::load_or_default(&config_path)?;
    let horizon = config.horizon()?;
    info!(
        start = %horizon.start(),
        end = %horizon.end(),
        days = horizon.len(),
        "schedule period"
    );

    let (staff, preferences) = load_inputs(&config)?;
    let draft = Schedule::from_preferences(&preferences);
    let roster = match config.data.roster_source {
        RosterSource::Schedule => draft.staff_ids(),
        RosterSource::Directory => staff.iter().map(|m| m.id.clone()).collect::<Vec<StaffId>>(),
    };

    let outside = preferences.iter().filter(|p| !horizon.contains(&p.date)).count();
    if outside > 0 {
        warn!(outside, "preferences fall outside the schedule period and are ignored by window checks");
    }

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(config.server.port);

        println!("Starting web server on port {}...", port);
        println!("Access the API at http://localhost:{}/api/schedule", port);

        let state = web::AppState::new(staff, preferences, horizon, config.limits.clone(), roster);
        web::start_server(config.server.host.clone(), port, config.server.static_dir.clone(), state).await?;
        return Ok(());
    }

    println!("Loaded {} staff and {} shift preferences", staff.len(), preferences.len());
    println!("\n=== Draft Schedule (from preferences) ===");
    print_daily_staffing(&draft, &horizon);

    println!("\n\n=== Running Autobalancer ===");
    let outcome = autobalance(&draft, &preferences, &horizon, &roster, &config.limits);

    print_schedule("Balanced Schedule", &outcome.schedule, &staff, &preferences, &horizon);
    print_daily_staffing(&outcome.schedule, &horizon);

    println!("\nTotal swaps: {}", outcome.swaps);
    if let Some(avg) = average_fairness(&outcome.schedule, &preferences, &staff) {
        println!("Average fairness: {}%", avg);
    }

    let violations = audit(&outcome.schedule, &horizon, &roster, &config.limits);
    print_violations(&violations, &staff);

    println!("\n=== Writing Schedule to Files ===");
    write_schedule_to_file(
        "Balanced Schedule",
        &outcome.schedule,
        &staff,
        &horizon,
        &config.output.schedule_path,
    )?;
    export_schedule_csv(&outcome.schedule, &config.output.csv_path)?;
    println!("Schedule saved to:");
    println!("  - {}", config.output.schedule_path.display());
    println!("  - {}", config.output.csv_path.display());

    Ok(())
}

/// Directory and preferences from the configured files, or seeded demo data
/// when either file is missing
fn load_inputs(
    config: &BalancerConfig,
) -> Result<(Vec<StaffMember>, Vec<PreferenceRequest>), Box<dyn std::error::Error>> {
    let roster_path: &Path = &config.data.roster_path;
    let preferences_path: &Path = &config.data.preferences_path;

    if roster_path.exists() && preferences_path.exists() {
        println!("Loading staff and preferences from data files...");
        let staff = load_staff(roster_path)?;
        let preferences = load_preferences(preferences_path)?;
        return Ok((staff, preferences));
    }

    info!(
        roster = %roster_path.display(),
        preferences = %preferences_path.display(),
        seed = config.data.demo_seed,
        "data files not found, using demo data"
    );
    let horizon = config.horizon()?;
    let staff = demo_staff();
    let preferences = generate_preferences(&staff, &horizon, config.data.demo_seed);
    Ok((staff, preferences))
}
