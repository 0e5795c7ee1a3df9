use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::ConsoleRepository;
use crate::dto::api::ApiEnvelope;
use crate::pagination::QueryParams;
use crate::repository::DashboardReader;
use crate::services::api::list_users;

#[get("/users")]
pub async fn api_users(request: HttpRequest, repo: web::Data<ConsoleRepository>) -> impl Responder {
    let query = QueryParams::parse(request.query_string());

    match list_users(repo.get_ref(), &query) {
        Ok(page) => HttpResponse::Ok().json(ApiEnvelope::new(page)),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/dashboard/stats")]
pub async fn api_dashboard_stats(repo: web::Data<ConsoleRepository>) -> impl Responder {
    match repo.dashboard_stats() {
        Ok(stats) => HttpResponse::Ok().json(ApiEnvelope::new(stats)),
        Err(e) => {
            log::error!("Failed to load dashboard stats: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
