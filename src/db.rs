use diesel::connection::SimpleConnection;
use diesel::pg::Pg;
use diesel::r2d2::ConnectionManager;
use diesel::sql_types::Integer;
use diesel::{
    ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper,
    TextExpressionMethods,
};
use r2d2::Pool;

use crate::error::{StoreError, StoreResult};
use crate::model::{
    Actor, ActorName, Content, ContentActorRow, ContentGenreRow, Genre, GenreName,
    NewActor, NewContent, NewContentActor, NewContentGenre, NewGenre,
};
use crate::repository::{
    ActorLink, AssociationRepository, ContentFilter, ContentRepository, EntityRepository,
    GenreLink,
};
use crate::schema::{actor, contenido, contenido_actor, contenido_genero, genero};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

const CREATE_CATALOG: &str =
    include_str!("../migrations/2024-05-20-000000_create_catalog/up.sql");

pub fn init_pool(database_url: &str, max_size: u32) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    Ok(pool)
}

/// Creates any missing catalog table. Existing tables are left untouched.
pub fn sync_schema(pool: &DbPool) -> anyhow::Result<()> {
    let mut conn = pool.get()?;
    conn.batch_execute(CREATE_CATALOG)?;
    Ok(())
}

/// Postgres-backed repositories sharing one connection pool.
#[derive(Clone)]
pub struct PgCatalog {
    pool: DbPool,
}

impl PgCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> StoreResult<r2d2::PooledConnection<ConnectionManager<PgConnection>>> {
        Ok(self.pool.get()?)
    }
}

impl EntityRepository<Actor> for PgCatalog {
    fn list_all(&self) -> StoreResult<Vec<Actor>> {
        let mut conn = self.conn()?;
        let actors = actor::table
            .order(actor::id.asc())
            .select(Actor::as_select())
            .load(&mut conn)?;
        Ok(actors)
    }

    fn get_by_id(&self, actor_id: i32) -> StoreResult<Option<Actor>> {
        let mut conn = self.conn()?;
        let found = actor::table
            .find(actor_id)
            .select(Actor::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(found)
    }

    fn create(&self, fields: NewActor) -> StoreResult<Actor> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(actor::table)
            .values(&fields)
            .returning(Actor::as_returning())
            .get_result(&mut conn)?;
        Ok(created)
    }

    fn update(&self, actor_id: i32, fields: NewActor) -> StoreResult<Actor> {
        let mut conn = self.conn()?;
        diesel::update(actor::table.find(actor_id))
            .set(&fields)
            .returning(Actor::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    fn delete(&self, actor_id: i32) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(actor::table.find(actor_id)).execute(&mut conn)?;
        deleted_rows(deleted)?;
        Ok(())
    }
}

impl EntityRepository<Genre> for PgCatalog {
    fn list_all(&self) -> StoreResult<Vec<Genre>> {
        let mut conn = self.conn()?;
        let genres = genero::table
            .order(genero::id.asc())
            .select(Genre::as_select())
            .load(&mut conn)?;
        Ok(genres)
    }

    fn get_by_id(&self, genre_id: i32) -> StoreResult<Option<Genre>> {
        let mut conn = self.conn()?;
        let found = genero::table
            .find(genre_id)
            .select(Genre::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(found)
    }

    fn create(&self, fields: NewGenre) -> StoreResult<Genre> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(genero::table)
            .values(&fields)
            .returning(Genre::as_returning())
            .get_result(&mut conn)?;
        Ok(created)
    }

    fn update(&self, genre_id: i32, fields: NewGenre) -> StoreResult<Genre> {
        let mut conn = self.conn()?;
        diesel::update(genero::table.find(genre_id))
            .set(&fields)
            .returning(Genre::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    fn delete(&self, genre_id: i32) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(genero::table.find(genre_id)).execute(&mut conn)?;
        deleted_rows(deleted)?;
        Ok(())
    }
}

impl EntityRepository<Content> for PgCatalog {
    fn list_all(&self) -> StoreResult<Vec<Content>> {
        let mut conn = self.conn()?;
        let contents = contenido::table
            .order(contenido::id.asc())
            .select(Content::as_select())
            .load(&mut conn)?;
        Ok(contents)
    }

    fn get_by_id(&self, content_id: i32) -> StoreResult<Option<Content>> {
        let mut conn = self.conn()?;
        let found = contenido::table
            .find(content_id)
            .select(Content::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(found)
    }

    fn create(&self, fields: NewContent) -> StoreResult<Content> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(contenido::table)
            .values(&fields)
            .returning(Content::as_returning())
            .get_result(&mut conn)?;
        Ok(created)
    }

    fn update(&self, content_id: i32, fields: NewContent) -> StoreResult<Content> {
        let mut conn = self.conn()?;
        diesel::update(contenido::table.find(content_id))
            .set(&fields)
            .returning(Content::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    fn delete(&self, content_id: i32) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(contenido::table.find(content_id)).execute(&mut conn)?;
        deleted_rows(deleted)?;
        Ok(())
    }
}

impl ContentRepository for PgCatalog {
    fn filter(&self, filter: &ContentFilter) -> StoreResult<Vec<Content>> {
        let mut conn = self.conn()?;
        let contents = filter_query(filter)
            .select(Content::as_select())
            .load(&mut conn)?;
        Ok(contents)
    }
}

/// Every condition in `filter` must hold; a title matches on any substring.
fn filter_query(filter: &ContentFilter) -> contenido::BoxedQuery<'static, Pg> {
    let mut query = contenido::table.into_boxed();
    if let Some(fragment) = &filter.titulo {
        query = query.filter(contenido::titulo.like(format!("%{}%", fragment)));
    }
    if let Some(category) = &filter.categoria {
        query = query.filter(contenido::categoria.eq(category.clone()));
    }
    query.order(contenido::id.asc())
}

/// Maps an empty delete to `NotFound`.
fn deleted_rows(deleted: usize) -> StoreResult<usize> {
    match deleted {
        0 => Err(StoreError::NotFound),
        n => Ok(n),
    }
}

// Natural keys may repeat; the oldest row wins.

fn content_by_title(title: &str) -> contenido::BoxedQuery<'_, Pg, Integer> {
    contenido::table
        .filter(contenido::titulo.eq(title))
        .order(contenido::id.asc())
        .select(contenido::id)
        .into_boxed()
}

fn actor_by_name(name: &ActorName) -> actor::BoxedQuery<'_, Pg, Integer> {
    actor::table
        .filter(actor::first_name.eq(name.first_name.as_str()))
        .filter(actor::last_name.eq(name.last_name.as_str()))
        .order(actor::id.asc())
        .select(actor::id)
        .into_boxed()
}

fn genre_by_name(name: &GenreName) -> genero::BoxedQuery<'_, Pg, Integer> {
    genero::table
        .filter(genero::genre_name.eq(name.genre_name.as_str()))
        .order(genero::id.asc())
        .select(genero::id)
        .into_boxed()
}

fn content_id_by_title(conn: &mut PgConnection, title: &str) -> StoreResult<i32> {
    content_by_title(title)
        .first::<i32>(conn)
        .optional()?
        .ok_or(StoreError::ContentNotFound)
}

fn actor_id_by_name(conn: &mut PgConnection, name: &ActorName) -> StoreResult<i32> {
    actor_by_name(name)
        .first::<i32>(conn)
        .optional()?
        .ok_or(StoreError::AttributeNotFound)
}

fn genre_id_by_name(conn: &mut PgConnection, name: &GenreName) -> StoreResult<i32> {
    genre_by_name(name)
        .first::<i32>(conn)
        .optional()?
        .ok_or(StoreError::AttributeNotFound)
}

impl AssociationRepository<ActorLink> for PgCatalog {
    fn list_all(&self) -> StoreResult<Vec<ContentActorRow>> {
        let mut conn = self.conn()?;
        let rows = contenido_actor::table
            .inner_join(contenido::table)
            .inner_join(actor::table)
            .order(contenido_actor::id.asc())
            .select((
                contenido::id,
                contenido::titulo,
                actor::first_name,
                actor::last_name,
            ))
            .load::<ContentActorRow>(&mut conn)?;
        Ok(rows)
    }

    fn list_for_content(&self, contenido_id: i32) -> StoreResult<Vec<ActorName>> {
        let mut conn = self.conn()?;
        let actors = contenido_actor::table
            .inner_join(actor::table)
            .filter(contenido_actor::contenido_id.eq(contenido_id))
            .order(contenido_actor::id.asc())
            .select((actor::first_name, actor::last_name))
            .load::<ActorName>(&mut conn)?;
        Ok(actors)
    }

    fn link(&self, titulo: &str, key: &ActorName) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let contenido_id = content_id_by_title(&mut conn, titulo)?;
        let actor_id = actor_id_by_name(&mut conn, key)?;
        diesel::insert_into(contenido_actor::table)
            .values(NewContentActor {
                contenido_id,
                actor_id,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn link_by_content_id(&self, contenido_id: i32, key: &ActorName) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let actor_id = actor_id_by_name(&mut conn, key)?;
        diesel::insert_into(contenido_actor::table)
            .values(NewContentActor {
                contenido_id,
                actor_id,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn unlink_all_for_content(&self, contenido_id: i32) -> StoreResult<usize> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            contenido_actor::table.filter(contenido_actor::contenido_id.eq(contenido_id)),
        )
        .execute(&mut conn)?;
        deleted_rows(deleted)
    }
}

impl AssociationRepository<GenreLink> for PgCatalog {
    fn list_all(&self) -> StoreResult<Vec<ContentGenreRow>> {
        let mut conn = self.conn()?;
        let rows = contenido_genero::table
            .inner_join(contenido::table)
            .inner_join(genero::table)
            .order(contenido_genero::id.asc())
            .select((contenido::titulo, genero::genre_name))
            .load::<ContentGenreRow>(&mut conn)?;
        Ok(rows)
    }

    fn list_for_content(&self, contenido_id: i32) -> StoreResult<Vec<GenreName>> {
        let mut conn = self.conn()?;
        let genres = contenido_genero::table
            .inner_join(genero::table)
            .filter(contenido_genero::contenido_id.eq(contenido_id))
            .order(contenido_genero::id.asc())
            .select(genero::genre_name)
            .load::<String>(&mut conn)?;
        Ok(genres
            .into_iter()
            .map(|genre_name| GenreName { genre_name })
            .collect())
    }

    fn link(&self, titulo: &str, key: &GenreName) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let contenido_id = content_id_by_title(&mut conn, titulo)?;
        let genero_id = genre_id_by_name(&mut conn, key)?;
        diesel::insert_into(contenido_genero::table)
            .values(NewContentGenre {
                contenido_id,
                genero_id,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn link_by_content_id(&self, contenido_id: i32, key: &GenreName) -> StoreResult<()> {
        let mut conn = self.conn()?;
        let genero_id = genre_id_by_name(&mut conn, key)?;
        diesel::insert_into(contenido_genero::table)
            .values(NewContentGenre {
                contenido_id,
                genero_id,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn unlink_all_for_content(&self, contenido_id: i32) -> StoreResult<usize> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            contenido_genero::table.filter(contenido_genero::contenido_id.eq(contenido_id)),
        )
        .execute(&mut conn)?;
        deleted_rows(deleted)
    }
}
