use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::services::auth_service::{AuthError, AuthService};
use crate::storage::KeyValueStore;

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/*
    /api/auth/signup
*/
pub async fn signup(
    data: web::Data<Arc<dyn KeyValueStore>>,
    input: web::Json<SignupRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let service = AuthService::new(data.get_ref().clone());

    match service.signup(&request.email, &request.password, &request.name) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => auth_error_response(e),
    }
}

/*
    /api/auth/signin
*/
pub async fn signin(
    data: web::Data<Arc<dyn KeyValueStore>>,
    input: web::Json<SigninRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let service = AuthService::new(data.get_ref().clone());

    match service.signin(&request.email, &request.password) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => auth_error_response(e),
    }
}

/*
    /api/auth/session
*/
pub async fn session(data: web::Data<Arc<dyn KeyValueStore>>) -> impl Responder {
    let service = AuthService::new(data.get_ref().clone());
    match service.current_user() {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::NotFound().body("No active session"),
    }
}

/*
    /api/auth/logout
*/
pub async fn logout(data: web::Data<Arc<dyn KeyValueStore>>) -> impl Responder {
    let service = AuthService::new(data.get_ref().clone());
    service.logout();
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}

fn auth_error_response(error: AuthError) -> HttpResponse {
    match error {
        AuthError::Validation(msg) => HttpResponse::BadRequest().body(msg),
        AuthError::InvalidCredentials => HttpResponse::Unauthorized().body("Invalid credentials"),
    }
}
