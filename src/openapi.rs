use actix_web::{get, HttpResponse};
use utoipa::OpenApi;

use crate::error::{ErrorResponse, MessageResponse};
use crate::model::{
    Actor, ActorName, Categoria, Content, ContentActorRow, ContentGenreRow, Genre, GenreName,
};
use crate::payload::{
    ActorNamePayload, ActorPayload, ContentActorPayload, ContentGenrePayload, ContentPayload,
    GenreNamePayload, GenrePayload,
};
use crate::{actors, content_actors, content_genres, contents, genres};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trailerflix API de Actores y Películas",
        version = "1.0.0",
        description = "Catalogo de peliculas y series con sus actores y generos"
    ),
    servers((url = "http://localhost:3000")),
    paths(
        actors::list,
        actors::get_by_id,
        actors::create,
        actors::update,
        actors::remove,
        genres::list,
        genres::get_by_id,
        genres::create,
        genres::update,
        genres::remove,
        contents::list,
        contents::filter,
        contents::get_by_id,
        contents::create,
        contents::update,
        contents::remove,
        content_actors::list,
        content_actors::list_for_content,
        content_actors::create,
        content_actors::add_to_content,
        content_actors::remove_all,
        content_genres::list,
        content_genres::list_for_content,
        content_genres::create,
        content_genres::add_to_content,
        content_genres::remove_all,
    ),
    components(schemas(
        Actor,
        Genre,
        Content,
        Categoria,
        ActorName,
        GenreName,
        ContentActorRow,
        ContentGenreRow,
        ActorPayload,
        GenrePayload,
        ContentPayload,
        ContentActorPayload,
        ActorNamePayload,
        ContentGenrePayload,
        GenreNamePayload,
        ErrorResponse,
        MessageResponse,
    )),
    tags(
        (name = "Actor", description = "Rutas relacionadas con los actores"),
        (name = "Genero", description = "Rutas relacionadas con los géneros"),
        (name = "Contenido", description = "Rutas relacionadas con los contenido(película o serie)"),
        (name = "ContenidoActor", description = "Rutas relacionadas con contenido y actores"),
        (name = "ContenidoGenero", description = "Rutas relacionados con contenido y géneros"),
    )
)]
pub struct ApiDoc;

#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
