use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::ride_service::RideService;

#[derive(Debug, Serialize, Deserialize)]
pub struct RideQuery {
    pub from: String,
    pub to: String,
}

/*
    /api/rides/compare
*/
pub async fn compare(input: web::Json<RideQuery>) -> impl Responder {
    let query = input.into_inner();
    let service = RideService::new();

    let rides = service.compare_rides(&query.from, &query.to).await;
    HttpResponse::Ok().json(rides)
}
