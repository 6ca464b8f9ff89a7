use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::plan::TripPlanResponse;
use crate::models::query::UserQuery;
use crate::services::trip_service::TripService;
use crate::storage::KeyValueStore;

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveTripRequest {
    pub query: UserQuery,
    pub plan: TripPlanResponse,
}

/*
    /api/trips
*/
pub async fn get_all(data: web::Data<Arc<dyn KeyValueStore>>) -> impl Responder {
    let service = TripService::new(data.get_ref().clone());
    HttpResponse::Ok().json(service.saved_trips())
}

/*
    /api/trips (save)
*/
pub async fn save(
    data: web::Data<Arc<dyn KeyValueStore>>,
    input: web::Json<SaveTripRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let service = TripService::new(data.get_ref().clone());

    let trip = service.save_trip(request.query, request.plan);
    HttpResponse::Ok().json(trip)
}

/*
    /api/trips/{id}
*/
pub async fn delete(
    path: web::Path<String>,
    data: web::Data<Arc<dyn KeyValueStore>>,
) -> impl Responder {
    let id = match Uuid::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let service = TripService::new(data.get_ref().clone());
    HttpResponse::Ok().json(service.delete_trip(id))
}
