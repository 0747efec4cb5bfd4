use std::fmt;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ModelError;
use crate::{Amenity, Base, City, EntityKind, Place, Review, State, User};

/// Identity of an object inside the storage facade: `(kind, id)`.
///
/// Rendered as `Kind.id`, the key format of the JSON storage file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub kind: EntityKind,
    pub id: String,
}

impl ObjectKey {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.id)
    }
}

impl FromStr for ObjectKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once('.')
            .ok_or_else(|| ModelError::Validation(format!("malformed object key: {s}")))?;
        Ok(Self::new(kind.parse()?, id))
    }
}

/// Any persisted object, tagged with its class name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Entity {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Amenity(_) => EntityKind::Amenity,
            Entity::City(_) => EntityKind::City,
            Entity::Place(_) => EntityKind::Place,
            Entity::Review(_) => EntityKind::Review,
            Entity::State(_) => EntityKind::State,
            Entity::User(_) => EntityKind::User,
        }
    }

    pub fn base(&self) -> &Base {
        match self {
            Entity::Amenity(v) => &v.base,
            Entity::City(v) => &v.base,
            Entity::Place(v) => &v.base,
            Entity::Review(v) => &v.base,
            Entity::State(v) => &v.base,
            Entity::User(v) => &v.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(self.kind(), self.id())
    }
}

/// A concrete entity type the storage facade can hold.
pub trait Model: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn base(&self) -> &Base;
    fn base_mut(&mut self) -> &mut Base;
    fn into_entity(self) -> Entity;
    fn from_entity(entity: &Entity) -> Option<&Self>;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn key(&self) -> ObjectKey {
        ObjectKey::new(Self::KIND, self.id())
    }

    /// Representation returned to API clients.
    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

macro_rules! impl_model {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Model for $ty {
                const KIND: EntityKind = EntityKind::$ty;

                fn base(&self) -> &Base { &self.base }
                fn base_mut(&mut self) -> &mut Base { &mut self.base }
                fn into_entity(self) -> Entity { Entity::$ty(self) }
                fn from_entity(entity: &Entity) -> Option<&Self> {
                    match entity {
                        Entity::$ty(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_model!(Amenity, City, Place, Review, State);
