//! In-memory repository implementations.
//!
//! Used when no database URL is configured, and by the test suites.

pub mod owner_repository;
pub mod pet_repository;
pub mod seed;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use mongodb::bson::oid::ObjectId;

use crate::domain::{Owner, Pet, PetType};
use crate::utils::errors::ApiError;

pub use owner_repository::InMemoryOwnerRepository;
pub use pet_repository::InMemoryPetRepository;

/// Shared backing store. Clones share the same maps, so an owner repository
/// and a pet repository built from one database see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    owners: Arc<RwLock<HashMap<ObjectId, Owner>>>,
    pets: Arc<RwLock<HashMap<ObjectId, Pet>>>,
    types: Arc<RwLock<Vec<PetType>>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<T>(_: T) -> ApiError {
    ApiError::InternalServerError("Failed to acquire in-memory store lock".to_string())
}
