use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::{domain::pet::model::{Pet, PetType}, utils::errors::ApiError};

#[async_trait]
pub trait PetRepository: Send + Sync {
    /// All known pet types, ordered by name.
    async fn find_pet_types(&self) -> Result<Vec<PetType>, ApiError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Pet>, ApiError>;
    /// Inserts a new pet or replaces an existing one. The returned pet always carries an id.
    async fn save(&self, pet: Pet) -> Result<Pet, ApiError>;
}
