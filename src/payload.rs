//! Request bodies. Every field is optional at the JSON level so that a missing
//! value surfaces as a 400 with the endpoint's own message instead of a
//! deserialization error.

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::{ActorName, Categoria, GenreName, NewActor, NewContent, NewGenre};

const ACTOR_FIELDS_REQUIRED: &str = "Nombre y apellido son obligatorios";
const GENRE_NAME_REQUIRED: &str = "El nombre del genero es obligatorio";
const CONTENT_FIELDS_REQUIRED: &str = "Poster, titulo, trailer y categoria son obligatorios !";
const INVALID_CATEGORIA: &str = "La categoria debe ser 'Serie' o 'Película'";

/// Empty strings count as missing.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accepts `"5"` as well as `5`; both become `Some("5")`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ActorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ActorPayload {
    pub fn validate(self) -> Result<NewActor, ApiError> {
        match (present(self.first_name), present(self.last_name)) {
            (Some(first_name), Some(last_name)) => Ok(NewActor {
                first_name,
                last_name,
            }),
            _ => Err(ApiError::BadRequest(ACTOR_FIELDS_REQUIRED)),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenrePayload {
    pub genre_name: Option<String>,
}

impl GenrePayload {
    pub fn validate(self) -> Result<NewGenre, ApiError> {
        present(self.genre_name)
            .map(|genre_name| NewGenre { genre_name })
            .ok_or(ApiError::BadRequest(GENRE_NAME_REQUIRED))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContentPayload {
    pub poster: Option<String>,
    pub titulo: Option<String>,
    pub resumen: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = Option<String>)]
    pub temporadas: Option<String>,
    pub trailer: Option<String>,
    #[schema(value_type = Option<Categoria>)]
    pub categoria: Option<String>,
}

impl ContentPayload {
    pub fn validate(self) -> Result<NewContent, ApiError> {
        let (Some(poster), Some(titulo), Some(trailer), Some(categoria)) = (
            present(self.poster),
            present(self.titulo),
            present(self.trailer),
            present(self.categoria),
        ) else {
            return Err(ApiError::BadRequest(CONTENT_FIELDS_REQUIRED));
        };
        let categoria =
            Categoria::parse(&categoria).ok_or(ApiError::BadRequest(INVALID_CATEGORIA))?;

        Ok(NewContent {
            poster,
            categoria,
            titulo,
            resumen: self.resumen,
            temporadas: self.temporadas,
            trailer,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContentActorPayload {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl ContentActorPayload {
    pub fn actor(&self) -> ActorName {
        ActorName {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ActorNamePayload {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<ActorNamePayload> for ActorName {
    fn from(value: ActorNamePayload) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContentGenrePayload {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub genre_name: String,
}

impl ContentGenrePayload {
    pub fn genre(&self) -> GenreName {
        GenreName {
            genre_name: self.genre_name.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenreNamePayload {
    #[serde(default)]
    pub genre_name: String,
}

impl From<GenreNamePayload> for GenreName {
    fn from(value: GenreNamePayload) -> Self {
        Self {
            genre_name: value.genre_name,
        }
    }
}

/// Query string of `GET /contenido/filtrar`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Fragment the title must contain.
    pub titulo: Option<String>,
    /// Exact category, "Serie" or "Película".
    pub categoria: Option<String>,
}
