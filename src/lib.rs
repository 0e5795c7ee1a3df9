pub mod domain;
pub mod dto;
pub mod forms;
pub mod loader;
pub mod pagination;
pub mod repository;
pub mod services;
pub mod table;

#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;

use crate::domain::user::User;
use crate::repository::cache::CachedPageSource;
use crate::repository::fixture::FixtureRepository;

/// Data source used by the HTTP handlers.
pub type ConsoleRepository = CachedPageSource<FixtureRepository, User>;

#[cfg(feature = "server")]
pub use server::{configure, run};

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::{App, HttpServer, middleware, web};
    use tera::Tera;

    use crate::ConsoleRepository;
    use crate::models::config::ServerConfig;
    use crate::repository::fixture::FixtureRepository;
    use crate::routes::api::{api_dashboard_stats, api_users};
    use crate::routes::dashboard::show_dashboard;
    use crate::routes::users::{search_users, show_index, show_users};

    /// Registers the console pages and the mock REST API.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/api")
                .wrap(Cors::permissive())
                .service(api_users)
                .service(api_dashboard_stats),
        )
        .service(show_index)
        .service(show_users)
        .service(search_users)
        .service(show_dashboard);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let repo = web::Data::new(
            ConsoleRepository::new(FixtureRepository::new(server_config.mock_total_users))
                .with_ttl(Duration::from_secs(server_config.cache_ttl_secs))
                .with_capacity(server_config.cache_capacity),
        );

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving admin console on {}:{}",
            server_config.address,
            server_config.port
        );

        HttpServer::new(move || {
            App::new()
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", &server_config.assets_dir))
                .configure(configure)
                .app_data(web::Data::new(tera.clone()))
                .app_data(repo.clone())
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
