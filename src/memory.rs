//! In-memory repositories used by the handler tests.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;

use crate::error::{StoreError, StoreResult};
use crate::model::{
    Actor, ActorName, Content, ContentActorRow, ContentGenreRow, Genre, GenreName, NewActor,
    NewContent, NewGenre,
};
use crate::repository::{
    ActorLink, AssociationRepository, ContentFilter, ContentRepository, EntityRepository,
    GenreLink,
};

trait Row: Clone {
    type Fields;
    fn id(&self) -> i32;
    fn assemble(id: i32, fields: Self::Fields) -> Self;
}

impl Row for Actor {
    type Fields = NewActor;

    fn id(&self) -> i32 {
        self.id
    }

    fn assemble(id: i32, fields: NewActor) -> Self {
        Actor {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
        }
    }
}

impl Row for Genre {
    type Fields = NewGenre;

    fn id(&self) -> i32 {
        self.id
    }

    fn assemble(id: i32, fields: NewGenre) -> Self {
        Genre {
            id,
            genre_name: fields.genre_name,
        }
    }
}

impl Row for Content {
    type Fields = NewContent;

    fn id(&self) -> i32 {
        self.id
    }

    fn assemble(id: i32, fields: NewContent) -> Self {
        Content {
            id,
            poster: fields.poster,
            categoria: fields.categoria,
            titulo: fields.titulo,
            resumen: fields.resumen,
            temporadas: fields.temporadas,
            trailer: fields.trailer,
        }
    }
}

/// Auto-incrementing table; ids are never handed out twice.
struct Table<R> {
    rows: Vec<R>,
    last_id: i32,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<R: Row> Table<R> {
    fn get(&self, id: i32) -> Option<R> {
        self.rows.iter().find(|row| row.id() == id).cloned()
    }

    fn insert(&mut self, fields: R::Fields) -> R {
        self.last_id += 1;
        let row = R::assemble(self.last_id, fields);
        self.rows.push(row.clone());
        row
    }

    fn replace(&mut self, id: i32, fields: R::Fields) -> StoreResult<R> {
        let slot = self
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(StoreError::NotFound)?;
        *slot = R::assemble(id, fields);
        Ok(slot.clone())
    }

    fn remove(&mut self, id: i32) -> StoreResult<()> {
        let before = self.rows.len();
        self.rows.retain(|row| row.id() != id);
        if self.rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
struct State {
    actors: Table<Actor>,
    genres: Table<Genre>,
    contents: Table<Content>,
    /// (contenido_id, actor_id) in insertion order.
    content_actors: Vec<(i32, i32)>,
    /// (contenido_id, genero_id) in insertion order.
    content_genres: Vec<(i32, i32)>,
}

impl State {
    fn content_id_by_title(&self, titulo: &str) -> StoreResult<i32> {
        self.contents
            .rows
            .iter()
            .find(|c| c.titulo == titulo)
            .map(|c| c.id)
            .ok_or(StoreError::ContentNotFound)
    }

    fn actor_id_by_name(&self, name: &ActorName) -> StoreResult<i32> {
        self.actors
            .rows
            .iter()
            .find(|a| a.first_name == name.first_name && a.last_name == name.last_name)
            .map(|a| a.id)
            .ok_or(StoreError::AttributeNotFound)
    }

    fn genre_id_by_name(&self, name: &GenreName) -> StoreResult<i32> {
        self.genres
            .rows
            .iter()
            .find(|g| g.genre_name == name.genre_name)
            .map(|g| g.id)
            .ok_or(StoreError::AttributeNotFound)
    }

    fn ensure_content(&self, contenido_id: i32) -> StoreResult<()> {
        match self.contents.get(contenido_id) {
            Some(_) => Ok(()),
            None => Err(StoreError::Other(anyhow!(
                "insert violates foreign key constraint on contenido_id {}",
                contenido_id
            ))),
        }
    }
}

/// `genero.genre_name` is `VARCHAR(100)`.
const GENRE_NAME_MAX: usize = 100;

fn fits_genre_name(fields: &NewGenre) -> StoreResult<()> {
    if fields.genre_name.chars().count() > GENRE_NAME_MAX {
        return Err(StoreError::Other(anyhow!(
            "value too long for type character varying({})",
            GENRE_NAME_MAX
        )));
    }
    Ok(())
}

/// Mirrors the Postgres catalog, including cascading link removal. A
/// `broken` catalog fails every call as an unreachable database would.
#[derive(Default)]
pub struct MemoryCatalog {
    state: RwLock<State>,
    broken: bool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, State>> {
        if self.broken {
            return Err(StoreError::Other(anyhow!("connection refused")));
        }
        self.state
            .read()
            .map_err(|e| StoreError::Other(anyhow!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, State>> {
        if self.broken {
            return Err(StoreError::Other(anyhow!("connection refused")));
        }
        self.state
            .write()
            .map_err(|e| StoreError::Other(anyhow!("Failed to acquire write lock: {}", e)))
    }
}

impl EntityRepository<Actor> for MemoryCatalog {
    fn list_all(&self) -> StoreResult<Vec<Actor>> {
        Ok(self.read()?.actors.rows.clone())
    }

    fn get_by_id(&self, id: i32) -> StoreResult<Option<Actor>> {
        Ok(self.read()?.actors.get(id))
    }

    fn create(&self, fields: NewActor) -> StoreResult<Actor> {
        Ok(self.write()?.actors.insert(fields))
    }

    fn update(&self, id: i32, fields: NewActor) -> StoreResult<Actor> {
        self.write()?.actors.replace(id, fields)
    }

    fn delete(&self, id: i32) -> StoreResult<()> {
        let mut state = self.write()?;
        state.actors.remove(id)?;
        state.content_actors.retain(|(_, actor_id)| *actor_id != id);
        Ok(())
    }
}

impl EntityRepository<Genre> for MemoryCatalog {
    fn list_all(&self) -> StoreResult<Vec<Genre>> {
        Ok(self.read()?.genres.rows.clone())
    }

    fn get_by_id(&self, id: i32) -> StoreResult<Option<Genre>> {
        Ok(self.read()?.genres.get(id))
    }

    fn create(&self, fields: NewGenre) -> StoreResult<Genre> {
        fits_genre_name(&fields)?;
        Ok(self.write()?.genres.insert(fields))
    }

    fn update(&self, id: i32, fields: NewGenre) -> StoreResult<Genre> {
        fits_genre_name(&fields)?;
        self.write()?.genres.replace(id, fields)
    }

    fn delete(&self, id: i32) -> StoreResult<()> {
        let mut state = self.write()?;
        state.genres.remove(id)?;
        state.content_genres.retain(|(_, genero_id)| *genero_id != id);
        Ok(())
    }
}

impl EntityRepository<Content> for MemoryCatalog {
    fn list_all(&self) -> StoreResult<Vec<Content>> {
        Ok(self.read()?.contents.rows.clone())
    }

    fn get_by_id(&self, id: i32) -> StoreResult<Option<Content>> {
        Ok(self.read()?.contents.get(id))
    }

    fn create(&self, fields: NewContent) -> StoreResult<Content> {
        Ok(self.write()?.contents.insert(fields))
    }

    fn update(&self, id: i32, fields: NewContent) -> StoreResult<Content> {
        self.write()?.contents.replace(id, fields)
    }

    fn delete(&self, id: i32) -> StoreResult<()> {
        let mut state = self.write()?;
        state.contents.remove(id)?;
        state.content_actors.retain(|(contenido_id, _)| *contenido_id != id);
        state.content_genres.retain(|(contenido_id, _)| *contenido_id != id);
        Ok(())
    }
}

impl ContentRepository for MemoryCatalog {
    fn filter(&self, filter: &ContentFilter) -> StoreResult<Vec<Content>> {
        let state = self.read()?;
        Ok(state
            .contents
            .rows
            .iter()
            .filter(|c| {
                filter
                    .titulo
                    .as_deref()
                    .map_or(true, |fragment| c.titulo.contains(fragment))
            })
            .filter(|c| {
                filter
                    .categoria
                    .as_deref()
                    .map_or(true, |category| c.categoria.as_str() == category)
            })
            .cloned()
            .collect())
    }
}

impl AssociationRepository<ActorLink> for MemoryCatalog {
    fn list_all(&self) -> StoreResult<Vec<ContentActorRow>> {
        let state = self.read()?;
        Ok(state
            .content_actors
            .iter()
            .filter_map(|(contenido_id, actor_id)| {
                let content = state.contents.get(*contenido_id)?;
                let actor = state.actors.get(*actor_id)?;
                Some(ContentActorRow {
                    id: content.id,
                    titulo: content.titulo,
                    first_name: actor.first_name,
                    last_name: actor.last_name,
                })
            })
            .collect())
    }

    fn list_for_content(&self, contenido_id: i32) -> StoreResult<Vec<ActorName>> {
        let state = self.read()?;
        Ok(state
            .content_actors
            .iter()
            .filter(|(content, _)| *content == contenido_id)
            .filter_map(|(_, actor_id)| state.actors.get(*actor_id))
            .map(|actor| ActorName {
                first_name: actor.first_name,
                last_name: actor.last_name,
            })
            .collect())
    }

    fn link(&self, titulo: &str, key: &ActorName) -> StoreResult<()> {
        let mut state = self.write()?;
        let contenido_id = state.content_id_by_title(titulo)?;
        let actor_id = state.actor_id_by_name(key)?;
        state.content_actors.push((contenido_id, actor_id));
        Ok(())
    }

    fn link_by_content_id(&self, contenido_id: i32, key: &ActorName) -> StoreResult<()> {
        let mut state = self.write()?;
        let actor_id = state.actor_id_by_name(key)?;
        state.ensure_content(contenido_id)?;
        state.content_actors.push((contenido_id, actor_id));
        Ok(())
    }

    fn unlink_all_for_content(&self, contenido_id: i32) -> StoreResult<usize> {
        let mut state = self.write()?;
        let before = state.content_actors.len();
        state
            .content_actors
            .retain(|(content, _)| *content != contenido_id);
        match before - state.content_actors.len() {
            0 => Err(StoreError::NotFound),
            removed => Ok(removed),
        }
    }
}

impl AssociationRepository<GenreLink> for MemoryCatalog {
    fn list_all(&self) -> StoreResult<Vec<ContentGenreRow>> {
        let state = self.read()?;
        Ok(state
            .content_genres
            .iter()
            .filter_map(|(contenido_id, genero_id)| {
                let content = state.contents.get(*contenido_id)?;
                let genre = state.genres.get(*genero_id)?;
                Some(ContentGenreRow {
                    titulo: content.titulo,
                    genre_name: genre.genre_name,
                })
            })
            .collect())
    }

    fn list_for_content(&self, contenido_id: i32) -> StoreResult<Vec<GenreName>> {
        let state = self.read()?;
        Ok(state
            .content_genres
            .iter()
            .filter(|(content, _)| *content == contenido_id)
            .filter_map(|(_, genero_id)| state.genres.get(*genero_id))
            .map(|genre| GenreName {
                genre_name: genre.genre_name,
            })
            .collect())
    }

    fn link(&self, titulo: &str, key: &GenreName) -> StoreResult<()> {
        let mut state = self.write()?;
        let contenido_id = state.content_id_by_title(titulo)?;
        let genero_id = state.genre_id_by_name(key)?;
        state.content_genres.push((contenido_id, genero_id));
        Ok(())
    }

    fn link_by_content_id(&self, contenido_id: i32, key: &GenreName) -> StoreResult<()> {
        let mut state = self.write()?;
        let genero_id = state.genre_id_by_name(key)?;
        state.ensure_content(contenido_id)?;
        state.content_genres.push((contenido_id, genero_id));
        Ok(())
    }

    fn unlink_all_for_content(&self, contenido_id: i32) -> StoreResult<usize> {
        let mut state = self.write()?;
        let before = state.content_genres.len();
        state
            .content_genres
            .retain(|(content, _)| *content != contenido_id);
        match before - state.content_genres.len() {
            0 => Err(StoreError::NotFound),
            removed => Ok(removed),
        }
    }
}
