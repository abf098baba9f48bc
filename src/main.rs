use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use env_logger::Env;

use crate::db::PgCatalog;
use crate::error::ApiError;
use crate::model::{Actor, Genre};
use crate::repository::{
    ActorLink, AssociationRepository, ContentRepository, EntityRepository, GenreLink,
};
use crate::settings::Settings;

mod actors;
mod content_actors;
mod content_genres;
mod contents;
mod db;
mod error;
mod genres;
#[cfg(test)]
mod memory;
mod model;
mod openapi;
mod payload;
mod repository;
mod schema;
mod settings;

async fn unknown_route() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound("Recurso no encontrado"))
}

/// Registers every catalog route against `store`.
pub fn catalog<R>(store: Arc<R>) -> impl FnOnce(&mut web::ServiceConfig)
where
    R: EntityRepository<Actor>
        + EntityRepository<Genre>
        + ContentRepository
        + AssociationRepository<ActorLink>
        + AssociationRepository<GenreLink>
        + 'static,
{
    move |cfg: &mut web::ServiceConfig| {
        let actor_repo: Arc<dyn EntityRepository<Actor>> = store.clone();
        let genre_repo: Arc<dyn EntityRepository<Genre>> = store.clone();
        let content_repo: Arc<dyn ContentRepository> = store.clone();
        let content_actor_repo: Arc<dyn AssociationRepository<ActorLink>> = store.clone();
        let content_genre_repo: Arc<dyn AssociationRepository<GenreLink>> = store;

        cfg.app_data(web::Data::from(actor_repo))
            .app_data(web::Data::from(genre_repo))
            .app_data(web::Data::from(content_repo))
            .app_data(web::Data::from(content_actor_repo))
            .app_data(web::Data::from(content_genre_repo))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                log::warn!("Rejected request body: {}", err);
                ApiError::BadRequest("Cuerpo JSON invalido").into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                log::warn!("Rejected path parameter: {}", err);
                ApiError::NotFound("Recurso no encontrado").into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                log::warn!("Rejected query string: {}", err);
                ApiError::BadRequest("Parametros de consulta invalidos").into()
            }))
            .default_service(web::to(unknown_route))
            .service(openapi::openapi_json)
            .service(
                web::scope("/actor")
                    .service(actors::list)
                    .service(actors::get_by_id)
                    .service(actors::create)
                    .service(actors::update)
                    .service(actors::remove),
            )
            .service(
                web::scope("/genero")
                    .service(genres::list)
                    .service(genres::get_by_id)
                    .service(genres::create)
                    .service(genres::update)
                    .service(genres::remove),
            )
            .service(
                web::scope("/contenido")
                    .service(contents::list)
                    .service(contents::filter)
                    .service(contents::get_by_id)
                    .service(contents::create)
                    .service(contents::update)
                    .service(contents::remove),
            )
            .service(
                web::scope("/contenidoActor")
                    .service(content_actors::list)
                    .service(content_actors::add_to_content)
                    .service(content_actors::list_for_content)
                    .service(content_actors::create)
                    .service(content_actors::remove_all),
            )
            .service(
                web::scope("/contenidoGenero")
                    .service(content_genres::list)
                    .service(content_genres::add_to_content)
                    .service(content_genres::list_for_content)
                    .service(content_genres::create)
                    .service(content_genres::remove_all),
            );
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::load().expect("Failed to load settings.");
    let pool = db::init_pool(&settings.database_url, settings.pool_size)
        .expect("Failed to create pool.");
    log::info!("Database connection pool ready");
    db::sync_schema(&pool).expect("Failed to synchronize catalog tables.");
    log::info!("Catalog tables synchronized");

    let store = Arc::new(PgCatalog::new(pool));
    let address = settings.bind_address();
    log::info!("Listening on {}:{}", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(catalog(store.clone()))
    })
    .bind(address)?
    .run()
    .await
}
