use serde::Serialize;

use crate::error::StoreResult;
use crate::model::{
    Actor, ActorName, Content, ContentActorRow, ContentGenreRow, Genre, GenreName, NewActor,
    NewContent, NewGenre,
};

/// A catalog table addressed by numeric id.
pub trait Record: Serialize + Send + 'static {
    /// Every mutable column; written on create and replaced wholesale on update.
    type Fields: Send + 'static;
}

impl Record for Actor {
    type Fields = NewActor;
}

impl Record for Genre {
    type Fields = NewGenre;
}

impl Record for Content {
    type Fields = NewContent;
}

pub trait EntityRepository<E: Record>: Send + Sync {
    /// All rows in insertion order.
    fn list_all(&self) -> StoreResult<Vec<E>>;
    fn get_by_id(&self, id: i32) -> StoreResult<Option<E>>;
    fn create(&self, fields: E::Fields) -> StoreResult<E>;
    /// Fails with `NotFound` when no row has `id`.
    fn update(&self, id: i32, fields: E::Fields) -> StoreResult<E>;
    /// Fails with `NotFound` when no row has `id`.
    fn delete(&self, id: i32) -> StoreResult<()>;
}

/// Conjunctive content filter; `None` places no restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFilter {
    pub titulo: Option<String>,
    pub categoria: Option<String>,
}

pub trait ContentRepository: EntityRepository<Content> {
    fn filter(&self, filter: &ContentFilter) -> StoreResult<Vec<Content>>;
}

/// The attribute side of a content link table.
pub trait LinkKind: Send + 'static {
    /// Natural key that identifies the attribute row.
    type Key: Send + 'static;
    /// One link flattened with content and attribute columns.
    type Row: Serialize + Send + 'static;
    /// Attribute columns alone, for listings scoped to one content.
    type Attribute: Serialize + Send + 'static;
}

pub struct ActorLink;

impl LinkKind for ActorLink {
    type Key = ActorName;
    type Row = ContentActorRow;
    type Attribute = ActorName;
}

pub struct GenreLink;

impl LinkKind for GenreLink {
    type Key = GenreName;
    type Row = ContentGenreRow;
    type Attribute = GenreName;
}

/// Links are resolved through natural keys in separate round trips with no
/// enclosing transaction: a concurrent delete between the lookups and the
/// insert can still leave a dangling link, which the foreign keys then reject.
pub trait AssociationRepository<L: LinkKind>: Send + Sync {
    fn list_all(&self) -> StoreResult<Vec<L::Row>>;
    fn list_for_content(&self, contenido_id: i32) -> StoreResult<Vec<L::Attribute>>;
    /// `ContentNotFound` if no content has `titulo`, `AttributeNotFound` if
    /// the key matches nothing. Duplicate links are allowed.
    fn link(&self, titulo: &str, key: &L::Key) -> StoreResult<()>;
    /// Always inserts a new link; existing links for the content are kept.
    fn link_by_content_id(&self, contenido_id: i32, key: &L::Key) -> StoreResult<()>;
    /// Removes every link of the content, returning how many went away.
    /// `NotFound` when there were none.
    fn unlink_all_for_content(&self, contenido_id: i32) -> StoreResult<usize>;
}
