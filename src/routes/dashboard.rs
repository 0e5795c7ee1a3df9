use actix_web::{HttpResponse, Responder, get, web};
use tera::Tera;

use crate::ConsoleRepository;
use crate::routes::{base_context, render_template};
use crate::services::dashboard::load_dashboard_page;

#[get("/dashboard")]
pub async fn show_dashboard(
    repo: web::Data<ConsoleRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_dashboard_page(repo.get_ref()) {
        Ok(data) => data,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let mut context = base_context("dashboard");
    context.insert("dashboard", &data);

    render_template(&tera, "dashboard/index.html", &context)
}
