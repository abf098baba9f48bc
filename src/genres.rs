use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::error::{blocking, ApiError, ErrorResponse};
use crate::model::Genre;
use crate::payload::GenrePayload;
use crate::repository::EntityRepository;

pub type GenreRepo = web::Data<dyn EntityRepository<Genre>>;

#[utoipa::path(
    get,
    path = "/genero",
    tag = "Genero",
    responses(
        (status = 200, description = "Lista de generos", body = [Genre]),
        (status = 404, description = "No se encontraron géneros", body = ErrorResponse),
        (status = 500, description = "Error al obtener géneros", body = ErrorResponse),
    )
)]
#[get("")]
pub async fn list(repo: GenreRepo) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let genres = blocking(move || repo.list_all())
        .await
        .map_err(|e| e.respond("No se encontraron géneros", "Error al obtener géneros"))?;

    if genres.is_empty() {
        return Err(ApiError::NotFound("No se encontraron géneros"));
    }
    Ok(HttpResponse::Ok().json(genres))
}

#[utoipa::path(
    get,
    path = "/genero/{id}",
    tag = "Genero",
    params(("id" = i32, Path, description = "ID del genero")),
    responses(
        (status = 200, description = "Genero encontrado", body = Genre),
        (status = 404, description = "Género no encontrado", body = ErrorResponse),
        (status = 500, description = "Error al obtener género", body = ErrorResponse),
    )
)]
#[get("/{id}")]
pub async fn get_by_id(repo: GenreRepo, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let id = id.into_inner();
    let genre = blocking(move || repo.get_by_id(id))
        .await
        .map_err(|e| e.respond("Género no encontrado", "Error al obtener género"))?
        .ok_or(ApiError::NotFound("Género no encontrado"))?;

    Ok(HttpResponse::Ok().json(genre))
}

#[utoipa::path(
    post,
    path = "/genero",
    tag = "Genero",
    request_body = GenrePayload,
    responses(
        (status = 201, description = "Genero creado", body = Genre),
        (status = 400, description = "El nombre del genero es obligatorio", body = ErrorResponse),
        (status = 500, description = "Error al crear el genero", body = ErrorResponse),
    )
)]
#[post("")]
pub async fn create(
    repo: GenreRepo,
    payload: web::Json<GenrePayload>,
) -> Result<HttpResponse, ApiError> {
    let fields = payload.into_inner().validate()?;
    let repo = repo.into_inner();
    let genre = blocking(move || repo.create(fields))
        .await
        .map_err(|e| e.respond("Error al crear el genero", "Error al crear el genero"))?;

    log::info!("Created genre {}", genre.id);
    Ok(HttpResponse::Created().json(genre))
}

#[utoipa::path(
    put,
    path = "/genero/{id}",
    tag = "Genero",
    params(("id" = i32, Path, description = "ID del genero a actualizar")),
    request_body = GenrePayload,
    responses(
        (status = 200, description = "Genero actualizado", body = Genre),
        (status = 400, description = "El nombre del genero es obligatorio", body = ErrorResponse),
        (status = 404, description = "No se pudo encontrar el genero", body = ErrorResponse),
        (status = 500, description = "Error al actualizar el genero", body = ErrorResponse),
    )
)]
#[put("/{id}")]
pub async fn update(
    repo: GenreRepo,
    id: web::Path<i32>,
    payload: web::Json<GenrePayload>,
) -> Result<HttpResponse, ApiError> {
    let fields = payload.into_inner().validate()?;
    let repo = repo.into_inner();
    let id = id.into_inner();
    let genre = blocking(move || repo.update(id, fields))
        .await
        .map_err(|e| e.respond("No se pudo encontrar el genero", "Error al actualizar el genero"))?;

    Ok(HttpResponse::Ok().json(genre))
}

#[utoipa::path(
    delete,
    path = "/genero/{id}",
    tag = "Genero",
    params(("id" = i32, Path, description = "ID del genero a eliminar")),
    responses(
        (status = 204, description = "Genero eliminado"),
        (status = 404, description = "No se pudo encontrar el genero", body = ErrorResponse),
        (status = 500, description = "Error al eliminar el genero", body = ErrorResponse),
    )
)]
#[delete("/{id}")]
pub async fn remove(repo: GenreRepo, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let repo = repo.into_inner();
    let id = id.into_inner();
    blocking(move || repo.delete(id))
        .await
        .map_err(|e| e.respond("No se pudo encontrar el genero", "Error al eliminar el genero"))?;

    log::info!("Deleted genre {}", id);
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::memory::MemoryCatalog;

    #[actix_web::test]
    async fn genre_lifecycle() {
        let app = test::init_service(
            App::new().configure(crate::catalog(Arc::new(MemoryCatalog::new()))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/genero")
            .set_json(json!({ "genre_name": "Drama" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created, json!({ "id": 1, "genre_name": "Drama" }));

        let req = test::TestRequest::get().uri("/genero/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: Value = test::read_body_json(resp).await;
        assert_eq!(fetched, created);

        let req = test::TestRequest::delete().uri("/genero/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/genero/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Género no encontrado" }));
    }

    #[actix_web::test]
    async fn ids_are_not_reused_after_delete() {
        let app = test::init_service(
            App::new().configure(crate::catalog(Arc::new(MemoryCatalog::new()))),
        )
        .await;

        for name in ["Drama", "Comedia"] {
            let req = test::TestRequest::post()
                .uri("/genero")
                .set_json(json!({ "genre_name": name }))
                .to_request();
            test::call_service(&app, req).await;
        }
        let req = test::TestRequest::delete().uri("/genero/2").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/genero")
            .set_json(json!({ "genre_name": "Terror" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["id"], 3);

        let req = test::TestRequest::get().uri("/genero").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            listed,
            json!([
                { "id": 1, "genre_name": "Drama" },
                { "id": 3, "genre_name": "Terror" }
            ])
        );
    }

    #[actix_web::test]
    async fn update_requires_a_name() {
        let app = test::init_service(
            App::new().configure(crate::catalog(Arc::new(MemoryCatalog::new()))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/genero")
            .set_json(json!({ "genre_name": "Drama" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/genero/1")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/genero/1").to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["genre_name"], "Drama");
    }

    #[actix_web::test]
    async fn names_longer_than_the_column_are_a_server_error() {
        let app = test::init_service(
            App::new().configure(crate::catalog(Arc::new(MemoryCatalog::new()))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/genero")
            .set_json(json!({ "genre_name": "a".repeat(100) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/genero")
            .set_json(json!({ "genre_name": "a".repeat(101) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Error al crear el genero" }));

        let req = test::TestRequest::put()
            .uri("/genero/1")
            .set_json(json!({ "genre_name": "ñ".repeat(101) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn non_numeric_id_is_not_found() {
        let app = test::init_service(
            App::new().configure(crate::catalog(Arc::new(MemoryCatalog::new()))),
        )
        .await;

        let req = test::TestRequest::get().uri("/genero/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
