use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::error::{blocking, ApiError, ErrorResponse, MessageResponse, StoreError};
use crate::model::{ActorName, ContentActorRow};
use crate::payload::{ActorNamePayload, ContentActorPayload};
use crate::repository::{ActorLink, AssociationRepository};

pub type ContentActorRepo = web::Data<dyn AssociationRepository<ActorLink>>;

const ACTOR_MISSING: &str = "No se encontro al actor.";

#[utoipa::path(
    get,
    path = "/contenidoActor",
    tag = "ContenidoActor",
    responses(
        (status = 200, description = "Actores de todos los contenidos", body = [ContentActorRow]),
        (status = 500, description = "Error en el servidor", body = ErrorResponse),
    )
)]
#[get("")]
pub async fn list(repo: ContentActorRepo) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let rows = blocking(move || repo.list_all()).await.map_err(|e| {
        e.respond(
            "Ocurrio un error buscando datos de contenido_actor.",
            "Ocurrio un error buscando datos de contenido_actor.",
        )
    })?;

    Ok(HttpResponse::Ok().json(rows))
}

#[utoipa::path(
    get,
    path = "/contenidoActor/{contenidoId}",
    tag = "ContenidoActor",
    params(("contenidoId" = i32, Path, description = "ID del contenido")),
    responses(
        (status = 200, description = "Actores del contenido, posiblemente ninguno", body = [ActorName]),
        (status = 500, description = "Ocurrio un error buscando los actores.", body = ErrorResponse),
    )
)]
#[get("/{contenido_id}")]
pub async fn list_for_content(
    repo: ContentActorRepo,
    contenido_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let contenido_id = contenido_id.into_inner();
    let actors = blocking(move || repo.list_for_content(contenido_id))
        .await
        .map_err(|e| {
            e.respond(
                "Ocurrio un error buscando los actores.",
                "Ocurrio un error buscando los actores.",
            )
        })?;

    Ok(HttpResponse::Ok().json(actors))
}

#[utoipa::path(
    post,
    path = "/contenidoActor",
    tag = "ContenidoActor",
    request_body = ContentActorPayload,
    responses(
        (status = 200, description = "Actor vinculado al contenido", body = MessageResponse),
        (status = 404, description = "No existe el contenido o el actor", body = ErrorResponse),
        (status = 500, description = "Ocurrio un error al agregar una entrada nueva.", body = ErrorResponse),
    )
)]
#[post("")]
pub async fn create(
    repo: ContentActorRepo,
    payload: web::Json<ContentActorPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let actor = payload.actor();
    let repo = repo.into_inner();
    blocking(move || repo.link(&payload.titulo, &actor))
        .await
        .map_err(|e| match e {
            StoreError::ContentNotFound => ApiError::NotFound("No se encontro la pelicula."),
            other => other.respond(ACTOR_MISSING, "Ocurrio un error al agregar una entrada nueva."),
        })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Se añadio correctamente la entrada en contenido_actor.",
    )))
}

#[utoipa::path(
    put,
    path = "/contenidoActor/actualizar/{contenidoId}",
    tag = "ContenidoActor",
    params(("contenidoId" = i32, Path, description = "ID del contenido")),
    request_body = ActorNamePayload,
    responses(
        (status = 200, description = "Actor añadido al contenido", body = MessageResponse),
        (status = 404, description = "No se encontro al actor.", body = ErrorResponse),
        (status = 500, description = "Ocurrio un error al actualizar contenido_actor.", body = ErrorResponse),
    )
)]
#[put("/actualizar/{contenido_id}")]
pub async fn add_to_content(
    repo: ContentActorRepo,
    contenido_id: web::Path<i32>,
    payload: web::Json<ActorNamePayload>,
) -> Result<HttpResponse, ApiError> {
    let actor = ActorName::from(payload.into_inner());
    let repo = repo.into_inner();
    let contenido_id = contenido_id.into_inner();
    blocking(move || repo.link_by_content_id(contenido_id, &actor))
        .await
        .map_err(|e| e.respond(ACTOR_MISSING, "Ocurrio un error al actualizar contenido_actor."))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Se añadio correctamente el actor a la pelicula.",
    )))
}

#[utoipa::path(
    delete,
    path = "/contenidoActor/{contenidoId}",
    tag = "ContenidoActor",
    params(("contenidoId" = i32, Path, description = "ID del contenido")),
    responses(
        (status = 200, description = "Se eliminaron todos los actores del contenido", body = MessageResponse),
        (status = 404, description = "No se encontro la entrada en contenido_actor.", body = ErrorResponse),
        (status = 500, description = "Ocurrio un error al eliminar la entrada.", body = ErrorResponse),
    )
)]
#[delete("/{contenido_id}")]
pub async fn remove_all(
    repo: ContentActorRepo,
    contenido_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let contenido_id = contenido_id.into_inner();
    let removed = blocking(move || repo.unlink_all_for_content(contenido_id))
        .await
        .map_err(|e| {
            e.respond(
                "No se encontro la entrada en contenido_actor.",
                "Ocurrio un error al eliminar la entrada.",
            )
        })?;

    log::info!("Removed {} actor links from content {}", removed, contenido_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Todas las entradas de esa peliucla se eliminaron correctamente.",
    )))
}
