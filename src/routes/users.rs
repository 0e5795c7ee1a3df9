use actix_web::{HttpRequest, Responder, get, post, web};
use tera::Tera;

use crate::ConsoleRepository;
use crate::forms::users::SearchForm;
use crate::pagination::QueryParams;
use crate::routes::{base_context, redirect, render_template};
use crate::services::users::{load_users_page, submit_search, users_location};

#[get("/")]
pub async fn show_index() -> impl Responder {
    redirect("/users")
}

#[get("/users")]
pub async fn show_users(
    request: HttpRequest,
    repo: web::Data<ConsoleRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = QueryParams::parse(request.query_string());
    let mut context = base_context("users");

    match load_users_page(repo.get_ref(), &query) {
        Ok(data) => {
            context.insert("users", &data);
        }
        Err(err) => {
            context.insert("error", &err.to_string());
        }
    }

    render_template(&tera, "users/index.html", &context)
}

#[post("/users/search")]
pub async fn search_users(web::Form(form): web::Form<SearchForm>) -> impl Responder {
    let current = QueryParams::parse(&form.current);

    match form.validated() {
        Ok(form) => redirect(&submit_search(&current, &form.q)),
        Err(err) => {
            log::warn!("Rejected search form: {err}");
            redirect(&users_location(&current))
        }
    }
}
