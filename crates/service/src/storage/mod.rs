//! Storage facade and its durable engines.
//!
//! [`Storage`] keeps every object in memory and stages changes until
//! [`Storage::save`] hands them to a [`StorageEngine`]: a JSON file
//! ([`FileEngine`]) or a database table ([`DbEngine`]).

pub mod db;
pub mod engine;
pub mod error;
pub mod facade;
pub mod file;

pub use db::DbEngine;
pub use engine::{ChangeSet, Objects, StorageEngine};
pub use error::StorageError;
pub use facade::{Batch, Storage};
pub use file::FileEngine;
