use std::io::Write;

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::*;

/// Whether a catalog entry is a series or a movie. Stored as its literal label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow, ToSchema,
)]
#[diesel(sql_type = Text)]
pub enum Categoria {
    Serie,
    #[serde(rename = "Película")]
    Pelicula,
}

impl Categoria {
    pub fn as_str(&self) -> &'static str {
        match self {
            Categoria::Serie => "Serie",
            Categoria::Pelicula => "Película",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Serie" => Some(Categoria::Serie),
            "Película" => Some(Categoria::Pelicula),
            _ => None,
        }
    }
}

impl ToSql<Text, Pg> for Categoria {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for Categoria {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let value = std::str::from_utf8(bytes.as_bytes())?;
        Categoria::parse(value).ok_or_else(|| format!("Unrecognized categoria: {}", value).into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = actor)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Actor {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = actor)]
pub struct NewActor {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = genero)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Genre {
    pub id: i32,
    pub genre_name: String,
}

#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = genero)]
pub struct NewGenre {
    pub genre_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = contenido)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Content {
    pub id: i32,
    pub poster: String,
    pub categoria: Categoria,
    pub titulo: String,
    pub resumen: Option<String>,
    pub temporadas: Option<String>,
    pub trailer: String,
}

// Updates replace the whole record, so a missing resumen/temporadas clears the column.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = contenido)]
#[diesel(treat_none_as_null = true)]
pub struct NewContent {
    pub poster: String,
    pub categoria: Categoria,
    pub titulo: String,
    pub resumen: Option<String>,
    pub temporadas: Option<String>,
    pub trailer: String,
}

/// One content-actor link flattened with the content id and title.
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, ToSchema)]
pub struct ContentActorRow {
    pub id: i32,
    pub titulo: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, ToSchema)]
pub struct ActorName {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, ToSchema)]
pub struct ContentGenreRow {
    pub titulo: String,
    pub genre_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, ToSchema)]
pub struct GenreName {
    pub genre_name: String,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = contenido_actor)]
pub struct NewContentActor {
    pub contenido_id: i32,
    pub actor_id: i32,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = contenido_genero)]
pub struct NewContentGenre {
    pub contenido_id: i32,
    pub genero_id: i32,
}
