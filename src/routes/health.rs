use actix_web::{HttpResponse, Responder};
use serde_json::json;

/*
    /health
*/
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}
