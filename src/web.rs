use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use actix_files::Files;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::Serialize;
use tracing::info;

use crate::schedule::{
    audit, autobalance, average_fairness, daily_staffing, CalendarDate, Horizon, PreferenceRequest,
    Schedule, StaffId, StaffMember, StaffReport, StaffingLimits,
};

/// Schedule state for the running server. The draft is kept so it can be
/// restored after an autobalance.
#[derive(Debug, Clone)]
pub struct BalancerState {
    pub schedule: Schedule,
    pub has_autobalanced: bool,
    pub total_swaps: usize,
}

pub struct AppState {
    pub staff: Vec<StaffMember>,
    pub preferences: Vec<PreferenceRequest>,
    pub horizon: Horizon,
    pub limits: StaffingLimits,
    pub roster: Vec<StaffId>,
    pub draft: Schedule,
    pub current: Mutex<BalancerState>,
}

impl AppState {
    pub fn new(
        staff: Vec<StaffMember>,
        preferences: Vec<PreferenceRequest>,
        horizon: Horizon,
        limits: StaffingLimits,
        roster: Vec<StaffId>,
    ) -> Self {
        let draft = Schedule::from_preferences(&preferences);
        let current = Mutex::new(BalancerState {
            schedule: draft.clone(),
            has_autobalanced: false,
            total_swaps: 0,
        });
        Self {
            staff,
            preferences,
            horizon,
            limits,
            roster,
            draft,
            current,
        }
    }

    fn lock_current(&self) -> Result<MutexGuard<'_, BalancerState>> {
        self.current
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("schedule state poisoned"))
    }
}

#[derive(Serialize)]
pub struct DayCount {
    date: CalendarDate,
    staff: usize,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    schedule: Schedule,
    has_autobalanced: bool,
    total_swaps: usize,
    average_fairness: Option<u32>,
    daily_staffing: Vec<DayCount>,
}

fn schedule_response(state: &AppState, current: &BalancerState) -> ScheduleResponse {
    ScheduleResponse {
        schedule: current.schedule.clone(),
        has_autobalanced: current.has_autobalanced,
        total_swaps: current.total_swaps,
        average_fairness: average_fairness(&current.schedule, &state.preferences, &state.staff),
        daily_staffing: daily_staffing(&current.schedule, &state.horizon)
            .into_iter()
            .map(|(date, staff)| DayCount { date, staff })
            .collect(),
    }
}

// Staff directory endpoint
async fn get_profiles(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.staff))
}

// Preference list endpoint
async fn get_preferences(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.preferences))
}

async fn get_horizon(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.horizon.dates()))
}

async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let current = state.lock_current()?;
    Ok(HttpResponse::Ok().json(schedule_response(&state, &current)))
}

// Repairs a snapshot of the current schedule, then stores the result
async fn post_autobalance(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = state.lock_current()?.schedule.clone();
    let outcome = autobalance(
        &snapshot,
        &state.preferences,
        &state.horizon,
        &state.roster,
        &state.limits,
    );
    info!(swaps = outcome.swaps, "autobalance requested over http");

    let mut current = state.lock_current()?;
    current.schedule = outcome.schedule;
    current.has_autobalanced = true;
    current.total_swaps = outcome.swaps;
    Ok(HttpResponse::Ok().json(schedule_response(&state, &current)))
}

// Restores the draft seeded from preferences
async fn post_revert(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut current = state.lock_current()?;
    current.schedule = state.draft.clone();
    current.has_autobalanced = false;
    current.total_swaps = 0;
    Ok(HttpResponse::Ok().json(schedule_response(&state, &current)))
}

async fn get_staff_report(id: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let staff_id = StaffId::new(id.into_inner());
    let Some(member) = state.staff.iter().find(|m| m.id == staff_id) else {
        return Ok(HttpResponse::NotFound()
            .json(serde_json::json!({"success": false, "error": format!("Unknown staff member {}", staff_id)})));
    };
    let current = state.lock_current()?;
    let report = StaffReport::build(member, &current.schedule, &state.preferences, &state.horizon);
    Ok(HttpResponse::Ok().json(report))
}

async fn get_violations(state: web::Data<AppState>) -> Result<HttpResponse> {
    let current = state.lock_current()?;
    let violations = audit(&current.schedule, &state.horizon, &state.roster, &state.limits);
    Ok(HttpResponse::Ok().json(violations))
}

/// API routes, shared by the server and the handler tests
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/profiles", web::get().to(get_profiles))
        .route("/api/shift-preferences", web::get().to(get_preferences))
        .route("/api/horizon", web::get().to(get_horizon))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/autobalance", web::post().to(post_autobalance))
        .route("/api/revert", web::post().to(post_revert))
        .route("/api/violations", web::get().to(get_violations))
        .service(web::resource("/api/staff/{id}").route(web::get().to(get_staff_report)));
}

pub async fn start_server(
    host: String,
    port: u16,
    static_dir: PathBuf,
    state: AppState,
) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
            .service(Files::new("/static", static_dir.clone()).show_files_listing())
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn app_state() -> AppState {
        let horizon = Horizon::from_range("2024-09-17".parse().unwrap(), "2024-09-19".parse().unwrap()).unwrap();
        let staff = vec![
            StaffMember { id: "a".into(), display_name: "A".into() },
            StaffMember { id: "b".into(), display_name: "B".into() },
        ];
        let preferences = vec![PreferenceRequest::new("a", horizon.get(0).unwrap())];
        let roster = staff.iter().map(|m| m.id.clone()).collect();
        AppState::new(staff, preferences, horizon, StaffingLimits::default(), roster)
    }

    #[actix_web::test]
    async fn autobalance_then_revert() {
        let data = web::Data::new(app_state());
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post().uri("/api/autobalance").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["has_autobalanced"], true);
        assert_eq!(body["total_swaps"], 5);
        assert_eq!(body["schedule"].as_array().unwrap().len(), 6);

        let req = test::TestRequest::post().uri("/api/revert").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["has_autobalanced"], false);
        assert_eq!(body["total_swaps"], 0);
        assert_eq!(
            body["schedule"],
            serde_json::json!([{"staffId": "a", "date": "2024-09-17"}])
        );
    }

    #[actix_web::test]
    async fn staff_report_and_unknown_staff() {
        let data = web::Data::new(app_state());
        let app = test::init_service(App::new().app_data(data).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/api/staff/a").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["fairness"], 100);
        assert_eq!(body["days"][0]["status"], "honored");

        let req = test::TestRequest::get().uri("/api/staff/zz").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn profiles_use_display_name_field() {
        let data = web::Data::new(app_state());
        let app = test::init_service(App::new().app_data(data).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/api/profiles").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0], serde_json::json!({"id": "a", "displayName": "A"}));
    }
}
