use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::config::PlanningConfig;
use crate::form::{agenda_csv_string, validate_request, PlanningRequest};
use crate::schedule::plan::TeamLoad;
use crate::schedule::rng::seed_from_clock;
use crate::schedule::{build_plan, PlanOutcome, PlanningExport};

// Last computed plan only; each request rebuilds it from scratch
pub struct AppState {
    pub defaults: PlanningConfig,
    pub last_plan: Mutex<Option<PlanOutcome>>,
}

impl AppState {
    pub fn new(defaults: PlanningConfig) -> Self {
        AppState {
            defaults,
            last_plan: Mutex::new(None),
        }
    }

    fn plan_slot(&self) -> Result<MutexGuard<'_, Option<PlanOutcome>>> {
        self.last_plan
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("planning state unavailable"))
    }
}

#[derive(Serialize)]
pub struct PlanningResponse {
    success: bool,
    seed: u32,
    planning: PlanningExport,
    advisories: Vec<String>,
    loads: Vec<TeamLoad>,
}

impl From<&PlanOutcome> for PlanningResponse {
    fn from(plan: &PlanOutcome) -> Self {
        PlanningResponse {
            success: true,
            seed: plan.config.seed,
            planning: plan.to_export(),
            advisories: plan.advisories.iter().map(|a| a.to_string()).collect(),
            loads: plan.loads.clone(),
        }
    }
}

// Build a planning from the submitted team list and parameters
async fn create_planning(
    req: web::Json<PlanningRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    // Reject bad input before any planning work
    let checked = validate_request(&req).and_then(|()| {
        let config = req.apply_to(&state.defaults);
        config.validate().map(|()| config)
    });
    let config = match checked {
        Ok(config) => config,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })));
        }
    };

    let plan = build_plan(&req.teams, &config);
    let response = PlanningResponse::from(&plan);

    // Keep the latest plan for the GET and CSV routes
    *state.plan_slot()? = Some(plan);
    Ok(HttpResponse::Ok().json(response))
}

async fn get_planning(state: web::Data<AppState>) -> Result<HttpResponse> {
    let last = state.plan_slot()?;

    if let Some(ref plan) = *last {
        Ok(HttpResponse::Ok().json(PlanningResponse::from(plan)))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"success": false, "error": "No planning available"})))
    }
}

async fn get_planning_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let last = state.plan_slot()?;

    match *last {
        Some(ref plan) => {
            let csv = agenda_csv_string(plan)
                .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to export CSV: {}", e)))?;
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(("Content-Disposition", "attachment; filename=\"planning.csv\""))
                .body(csv))
        }
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"success": false, "error": "No planning available"}))),
    }
}

// New draw: same inputs with a different seed give a different but reproducible agenda
async fn new_seed() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"seed": seed_from_clock()})))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/planning", web::post().to(create_planning))
        .route("/api/planning", web::get().to(get_planning))
        .route("/api/planning/csv", web::get().to(get_planning_csv))
        .route("/api/seed", web::post().to(new_seed));
}

pub async fn start_server(port: u16, defaults: PlanningConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(defaults));
    info!(port, "starting planning server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    fn app_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(PlanningConfig::default()))
    }

    #[actix_web::test]
    async fn planning_is_built_stored_and_exported() {
        let state = app_state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/planning").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = serde_json::json!({
            "teams": "A 1\nA 2\nB 1",
            "pitches": 1,
            "matchesPerTeam": 2,
            "seed": 1
        });
        let req = test::TestRequest::post().uri("/api/planning").set_json(&body).to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["success"], true);
        assert_eq!(resp["seed"], 1);
        assert_eq!(resp["planning"]["pitches"], 1);
        assert_eq!(resp["planning"]["slots"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::get().uri("/api/planning").to_request();
        let stored: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stored["planning"], resp["planning"]);

        let req = test::TestRequest::get().uri("/api/planning/csv").to_request();
        let csv = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(csv.to_vec()).unwrap();
        assert!(text.starts_with("Heure,Terrain,Équipe A,Équipe B"));
        assert_eq!(text.lines().count(), 3);
    }

    #[actix_web::test]
    async fn invalid_request_is_rejected() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let body = serde_json::json!({"teams": "A 1\nB 1", "pitches": 0});
        let req = test::TestRequest::post().uri("/api/planning").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn oversized_quota_is_rejected_and_nothing_is_stored() {
        let state = app_state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;
        let body = serde_json::json!({
            "teams": "A 1\nB 1",
            "matchesPerTeam": 4_000_000_000u32,
            "allowRematches": true
        });
        let req = test::TestRequest::post().uri("/api/planning").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/planning").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn seed_endpoint_returns_non_zero_seed() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::post().uri("/api/seed").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(resp["seed"].as_u64().unwrap() > 0);
    }
}
