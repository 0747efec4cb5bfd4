use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::base::Base;
use crate::entity::{Entity, Model};
use crate::errors::ModelError;
use crate::kind::EntityKind;
use crate::payload::Payload;

/// A user account. `password` holds a password hash and is never part of
/// the API representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: Base,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Payload for NewUser {
    const FIELDS: &'static [&'static str] = &["email", "password", "first_name", "last_name"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at"];
    const REJECT_UNKNOWN: bool = false;
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_email(&self.email)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Payload for UserPatch {
    const FIELDS: &'static [&'static str] = &["email", "password", "first_name", "last_name"];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at"];
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        match &self.email {
            Some(email) => validate_email(email),
            None => Ok(()),
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("Invalid email".into()));
    }
    Ok(())
}

impl User {
    /// `password_hash` must already be hashed; the plain password in `input` is discarded.
    pub fn new(input: NewUser, password_hash: String) -> Self {
        Self {
            base: Base::new(),
            email: input.email,
            password: password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
        }
    }

    /// Apply a patch whose `password`, if any, has already been hashed.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(v) = patch.email { self.email = v; }
        if let Some(v) = patch.password { self.password = v; }
        if let Some(v) = patch.first_name { self.first_name = v; }
        if let Some(v) = patch.last_name { self.last_name = v; }
    }
}

impl Model for User {
    const KIND: EntityKind = EntityKind::User;

    fn base(&self) -> &Base { &self.base }
    fn base_mut(&mut self) -> &mut Base { &mut self.base }
    fn into_entity(self) -> Entity { Entity::User(self) }
    fn from_entity(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::User(v) => Some(v),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut value {
            map.remove("password");
        }
        value
    }
}
