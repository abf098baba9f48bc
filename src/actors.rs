use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::error::{blocking, ApiError, ErrorResponse};
use crate::model::Actor;
use crate::payload::ActorPayload;
use crate::repository::EntityRepository;

pub type ActorRepo = web::Data<dyn EntityRepository<Actor>>;

#[utoipa::path(
    get,
    path = "/actor",
    tag = "Actor",
    responses(
        (status = 200, description = "Lista de actores", body = [Actor]),
        (status = 404, description = "No se encontraron actores", body = ErrorResponse),
        (status = 500, description = "Error en el servidor", body = ErrorResponse),
    )
)]
#[get("")]
pub async fn list(repo: ActorRepo) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let actors = blocking(move || repo.list_all())
        .await
        .map_err(|e| e.respond("No se encontraron actores", "Server error"))?;

    if actors.is_empty() {
        return Err(ApiError::NotFound("No se encontraron actores"));
    }
    Ok(HttpResponse::Ok().json(actors))
}

#[utoipa::path(
    get,
    path = "/actor/{id}",
    tag = "Actor",
    params(("id" = i32, Path, description = "ID del actor")),
    responses(
        (status = 200, description = "Actor encontrado", body = Actor),
        (status = 404, description = "No se encontro el actor", body = ErrorResponse),
        (status = 500, description = "Error en el servidor", body = ErrorResponse),
    )
)]
#[get("/{id}")]
pub async fn get_by_id(repo: ActorRepo, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let id = id.into_inner();
    let actor = blocking(move || repo.get_by_id(id))
        .await
        .map_err(|e| e.respond("No se encontro el actor", "Server error"))?
        .ok_or(ApiError::NotFound("No se encontro el actor"))?;

    Ok(HttpResponse::Ok().json(actor))
}

#[utoipa::path(
    post,
    path = "/actor",
    tag = "Actor",
    request_body = ActorPayload,
    responses(
        (status = 201, description = "Actor creado", body = Actor),
        (status = 400, description = "Nombre y apellido son obligatorios", body = ErrorResponse),
        (status = 500, description = "Error al crear un actor", body = ErrorResponse),
    )
)]
#[post("")]
pub async fn create(
    repo: ActorRepo,
    payload: web::Json<ActorPayload>,
) -> Result<HttpResponse, ApiError> {
    let fields = payload.into_inner().validate()?;
    let repo = repo.into_inner();
    let actor = blocking(move || repo.create(fields))
        .await
        .map_err(|e| e.respond("Error al crear un actor", "Error al crear un actor"))?;

    log::info!("Created actor {}", actor.id);
    Ok(HttpResponse::Created().json(actor))
}

#[utoipa::path(
    put,
    path = "/actor/{id}",
    tag = "Actor",
    params(("id" = i32, Path, description = "ID del actor a actualizar")),
    request_body = ActorPayload,
    responses(
        (status = 200, description = "Actor actualizado", body = Actor),
        (status = 400, description = "Nombre y apellido son obligatorios", body = ErrorResponse),
        (status = 404, description = "No se pudo actualizar al actor", body = ErrorResponse),
        (status = 500, description = "Error al actualizar al actor", body = ErrorResponse),
    )
)]
#[put("/{id}")]
pub async fn update(
    repo: ActorRepo,
    id: web::Path<i32>,
    payload: web::Json<ActorPayload>,
) -> Result<HttpResponse, ApiError> {
    let fields = payload.into_inner().validate()?;
    let repo = repo.into_inner();
    let id = id.into_inner();
    let actor = blocking(move || repo.update(id, fields))
        .await
        .map_err(|e| e.respond("No se pudo actualizar al actor", "Error al actualizar al actor"))?;

    Ok(HttpResponse::Ok().json(actor))
}

#[utoipa::path(
    delete,
    path = "/actor/{id}",
    tag = "Actor",
    params(("id" = i32, Path, description = "ID del actor a eliminar")),
    responses(
        (status = 204, description = "Actor eliminado"),
        (status = 404, description = "No se encontro al actor", body = ErrorResponse),
        (status = 500, description = "Error al eliminar el actor", body = ErrorResponse),
    )
)]
#[delete("/{id}")]
pub async fn remove(repo: ActorRepo, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let id = id.into_inner();
    blocking(move || repo.delete(id))
        .await
        .map_err(|e| e.respond("No se encontro al actor", "Error al eliminar el actor"))?;

    log::info!("Deleted actor {}", id);
    Ok(HttpResponse::NoContent().finish())
}
