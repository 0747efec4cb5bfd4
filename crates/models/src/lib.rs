//! Entity records of the hbnb catalogue and the payload types used to
//! create and patch them.
//!
//! Every entity embeds a [`base::Base`] (id + timestamps) and implements
//! [`entity::Model`], which ties the concrete type to its [`kind::EntityKind`]
//! tag so the storage facade can hold all six kinds in one map.

pub mod errors;
pub mod kind;
pub mod base;
pub mod entity;
pub mod payload;
pub mod amenity;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;
pub mod record;
pub mod db;

pub use amenity::Amenity;
pub use base::Base;
pub use city::City;
pub use entity::{Entity, Model, ObjectKey};
pub use kind::EntityKind;
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;
