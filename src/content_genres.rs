use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::error::{blocking, ApiError, ErrorResponse, MessageResponse, StoreError};
use crate::model::{ContentGenreRow, GenreName};
use crate::payload::{ContentGenrePayload, GenreNamePayload};
use crate::repository::{AssociationRepository, GenreLink};

pub type ContentGenreRepo = web::Data<dyn AssociationRepository<GenreLink>>;

const GENRE_MISSING: &str = "No se encontro genero con ese nombre.";
const FAILED: &str = "Ocurrio un error :(.";

#[utoipa::path(
    get,
    path = "/contenidoGenero",
    tag = "ContenidoGenero",
    responses(
        (status = 200, description = "Generos de todos los contenidos", body = [ContentGenreRow]),
        (status = 500, description = "Ocurrio un error.", body = ErrorResponse),
    )
)]
#[get("")]
pub async fn list(repo: ContentGenreRepo) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let rows = blocking(move || repo.list_all())
        .await
        .map_err(|e| e.respond("Ocurrio un error.", "Ocurrio un error."))?;

    Ok(HttpResponse::Ok().json(rows))
}

#[utoipa::path(
    get,
    path = "/contenidoGenero/{contenidoId}",
    tag = "ContenidoGenero",
    params(("contenidoId" = i32, Path, description = "ID del contenido")),
    responses(
        (status = 200, description = "Generos del contenido, posiblemente ninguno", body = [GenreName]),
        (status = 500, description = "Ocurrio un error.", body = ErrorResponse),
    )
)]
#[get("/{contenido_id}")]
pub async fn list_for_content(
    repo: ContentGenreRepo,
    contenido_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let contenido_id = contenido_id.into_inner();
    let genres = blocking(move || repo.list_for_content(contenido_id))
        .await
        .map_err(|e| e.respond("Ocurrio un error.", "Ocurrio un error."))?;

    Ok(HttpResponse::Ok().json(genres))
}

#[utoipa::path(
    post,
    path = "/contenidoGenero",
    tag = "ContenidoGenero",
    request_body = ContentGenrePayload,
    responses(
        (status = 200, description = "Genero vinculado al contenido", body = MessageResponse),
        (status = 404, description = "No existe el contenido o el genero", body = ErrorResponse),
        (status = 500, description = "Ocurrio un error :(.", body = ErrorResponse),
    )
)]
#[post("")]
pub async fn create(
    repo: ContentGenreRepo,
    payload: web::Json<ContentGenrePayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let genre = payload.genre();
    let repo = repo.into_inner();
    blocking(move || repo.link(&payload.titulo, &genre))
        .await
        .map_err(|e| match e {
            StoreError::ContentNotFound => {
                ApiError::NotFound("No se encontro pelicula con ese titulo.")
            }
            other => other.respond(GENRE_MISSING, FAILED),
        })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Se agrego el genero de manera existosa :).",
    )))
}

#[utoipa::path(
    put,
    path = "/contenidoGenero/actualizar/{contenidoId}",
    tag = "ContenidoGenero",
    params(("contenidoId" = i32, Path, description = "ID del contenido")),
    request_body = GenreNamePayload,
    responses(
        (status = 200, description = "Genero añadido al contenido", body = MessageResponse),
        (status = 404, description = "No se encontro genero con ese nombre.", body = ErrorResponse),
        (status = 500, description = "Ocurrio un error :(.", body = ErrorResponse),
    )
)]
#[put("/actualizar/{contenido_id}")]
pub async fn add_to_content(
    repo: ContentGenreRepo,
    contenido_id: web::Path<i32>,
    payload: web::Json<GenreNamePayload>,
) -> Result<HttpResponse, ApiError> {
    let genre = GenreName::from(payload.into_inner());
    let repo = repo.into_inner();
    let contenido_id = contenido_id.into_inner();
    blocking(move || repo.link_by_content_id(contenido_id, &genre))
        .await
        .map_err(|e| e.respond(GENRE_MISSING, FAILED))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "El genero se añadio correctamente a la peliucla.",
    )))
}

#[utoipa::path(
    delete,
    path = "/contenidoGenero/{contenidoId}",
    tag = "ContenidoGenero",
    params(("contenidoId" = i32, Path, description = "ID del contenido")),
    responses(
        (status = 200, description = "Se eliminaron todos los generos del contenido", body = MessageResponse),
        (status = 404, description = "No se encontro el dato en contenido_genero.", body = ErrorResponse),
        (status = 500, description = "Ocurrio un error :( .", body = ErrorResponse),
    )
)]
#[delete("/{contenido_id}")]
pub async fn remove_all(
    repo: ContentGenreRepo,
    contenido_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let contenido_id = contenido_id.into_inner();
    let removed = blocking(move || repo.unlink_all_for_content(contenido_id))
        .await
        .map_err(|e| {
            e.respond(
                "No se encontro el dato en contenido_genero.",
                "Ocurrio un error :( .",
            )
        })?;

    log::info!("Removed {} genre links from content {}", removed, contenido_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Dato eliminado correctamente de contenido_genero.",
    )))
}
