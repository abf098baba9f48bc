use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::error::{blocking, ApiError, ErrorResponse};
use crate::model::Content;
use crate::payload::{present, ContentPayload, FilterQuery};
use crate::repository::{ContentFilter, ContentRepository, EntityRepository};

pub type ContentRepo = web::Data<dyn ContentRepository>;

#[utoipa::path(
    get,
    path = "/contenido",
    tag = "Contenido",
    responses(
        (status = 200, description = "Lista de contenidos", body = [Content]),
        (status = 404, description = "No se encontraron peliculas", body = ErrorResponse),
        (status = 500, description = "Error al obtener peliculas", body = ErrorResponse),
    )
)]
#[get("")]
pub async fn list(repo: ContentRepo) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let contents = blocking(move || repo.list_all())
        .await
        .map_err(|e| e.respond("No se encontraron peliculas", "Error al obtener peliculas"))?;

    if contents.is_empty() {
        return Err(ApiError::NotFound("No se encontraron peliculas"));
    }
    Ok(HttpResponse::Ok().json(contents))
}

#[utoipa::path(
    get,
    path = "/contenido/filtrar",
    tag = "Contenido",
    params(FilterQuery),
    responses(
        (status = 200, description = "Contenidos que coinciden con los filtros", body = [Content]),
        (status = 404, description = "Ningun contenido coincide", body = ErrorResponse),
        (status = 500, description = "Error al filtrar peliculas", body = ErrorResponse),
    )
)]
#[get("/filtrar")]
pub async fn filter(
    repo: ContentRepo,
    query: web::Query<FilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let filter = ContentFilter {
        titulo: present(query.titulo),
        categoria: present(query.categoria),
    };
    let repo = repo.into_inner();
    let contents = blocking(move || repo.filter(&filter))
        .await
        .map_err(|e| e.respond("No se encontraron peliculas", "Error al filtrar peliculas"))?;

    if contents.is_empty() {
        return Err(ApiError::NotFound(
            "No se encontraron peliculas que coincidan con los filtros",
        ));
    }
    Ok(HttpResponse::Ok().json(contents))
}

#[utoipa::path(
    get,
    path = "/contenido/{id}",
    tag = "Contenido",
    params(("id" = i32, Path, description = "ID del contenido")),
    responses(
        (status = 200, description = "Contenido encontrado", body = Content),
        (status = 404, description = "Pelicula no encontrada", body = ErrorResponse),
        (status = 500, description = "Error al buscar las peliculas", body = ErrorResponse),
    )
)]
#[get("/{id}")]
pub async fn get_by_id(repo: ContentRepo, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let id = id.into_inner();
    let content = blocking(move || repo.get_by_id(id))
        .await
        .map_err(|e| e.respond("Pelicula no encontrada", "Error al buscar las peliculas"))?
        .ok_or(ApiError::NotFound("Pelicula no encontrada"))?;

    Ok(HttpResponse::Ok().json(content))
}

#[utoipa::path(
    post,
    path = "/contenido",
    tag = "Contenido",
    request_body = ContentPayload,
    responses(
        (status = 201, description = "Contenido creado", body = Content),
        (status = 400, description = "Datos incompletos o incorrectos", body = ErrorResponse),
        (status = 500, description = "Error al crear la pelicula", body = ErrorResponse),
    )
)]
#[post("")]
pub async fn create(
    repo: ContentRepo,
    payload: web::Json<ContentPayload>,
) -> Result<HttpResponse, ApiError> {
    let fields = payload.into_inner().validate()?;
    let repo = repo.into_inner();
    let content = blocking(move || repo.create(fields))
        .await
        .map_err(|e| e.respond("Error al crear la pelicula", "Error al crear la pelicula"))?;

    log::info!("Created content {} ({})", content.id, content.titulo);
    Ok(HttpResponse::Created().json(content))
}

#[utoipa::path(
    put,
    path = "/contenido/{id}",
    tag = "Contenido",
    params(("id" = i32, Path, description = "ID del contenido a actualizar")),
    request_body = ContentPayload,
    responses(
        (status = 200, description = "Contenido actualizado", body = Content),
        (status = 400, description = "Datos incompletos o incorrectos", body = ErrorResponse),
        (status = 404, description = "Pelicula no encontrada", body = ErrorResponse),
        (status = 500, description = "Error al actualizar la pelicula", body = ErrorResponse),
    )
)]
#[put("/{id}")]
pub async fn update(
    repo: ContentRepo,
    id: web::Path<i32>,
    payload: web::Json<ContentPayload>,
) -> Result<HttpResponse, ApiError> {
    let fields = payload.into_inner().validate()?;
    let repo = repo.into_inner();
    let id = id.into_inner();
    let content = blocking(move || repo.update(id, fields))
        .await
        .map_err(|e| e.respond("Pelicula no encontrada", "Error al actualizar la pelicula"))?;

    Ok(HttpResponse::Ok().json(content))
}

#[utoipa::path(
    delete,
    path = "/contenido/{id}",
    tag = "Contenido",
    params(("id" = i32, Path, description = "ID del contenido a eliminar")),
    responses(
        (status = 204, description = "Contenido eliminado"),
        (status = 404, description = "Pelicula no encontrada", body = ErrorResponse),
        (status = 500, description = "Error al eliminar la pelicula", body = ErrorResponse),
    )
)]
#[delete("/{id}")]
pub async fn remove(repo: ContentRepo, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let id = id.into_inner();
    blocking(move || repo.delete(id))
        .await
        .map_err(|e| e.respond("Pelicula no encontrada", "Error al eliminar la pelicula"))?;

    log::info!("Deleted content {}", id);
    Ok(HttpResponse::NoContent().finish())
}
