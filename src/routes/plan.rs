use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::query::UserQuery;
use crate::services::gemini::PlanError;
use crate::services::planning_service::PlanningService;

/*
    /api/plan
*/
pub async fn create_plan(input: web::Json<UserQuery>) -> impl Responder {
    let query = input.into_inner();

    let service = match PlanningService::new() {
        Ok(service) => service,
        Err(e) => return plan_error_response(&e),
    };

    match service.plan_trip(&query).await {
        Ok(plan) => HttpResponse::Ok().json(plan),
        Err(e) => {
            eprintln!("Trip planning failed: {}", e);
            plan_error_response(&e)
        }
    }
}

/// Collapse every planner failure to one readable message. Configuration
/// problems are the operator's to fix (500); upstream exhaustion is the
/// service being down from the caller's point of view (502).
fn plan_error_response(error: &PlanError) -> HttpResponse {
    let body = json!({ "error": error.to_string() });
    match error {
        PlanError::Configuration(_) => HttpResponse::InternalServerError().json(body),
        PlanError::Exhausted { .. } | PlanError::HttpError(_) => {
            HttpResponse::BadGateway().json(body)
        }
    }
}
