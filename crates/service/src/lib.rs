//! Service layer: catalogue operations on top of the storage facade.
//! - One module per entity group, free async functions over `&Storage`.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Every failure is a [`errors::ServiceError`].

pub mod errors;
pub mod storage;
pub mod payload;
pub mod password;
mod relations;
pub mod states;
pub mod cities;
pub mod amenities;
pub mod users;
pub mod places;
pub mod reviews;
pub mod place_amenities;
pub mod stats;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use storage::Storage;
