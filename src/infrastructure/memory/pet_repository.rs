use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::pet::model::{Pet, PetType};
use crate::domain::pet::repository::PetRepository;
use crate::infrastructure::memory::{lock_error, InMemoryDatabase};
use crate::utils::errors::ApiError;

#[derive(Debug, Clone)]
pub struct InMemoryPetRepository {
    db: InMemoryDatabase
}

impl InMemoryPetRepository {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }

    /// Registers a pet type, returning the existing one when the name is taken.
    pub fn add_pet_type(&self, name: &str) -> Result<PetType, ApiError> {
        let mut types = self.db.types.write().map_err(lock_error)?;
        if let Some(existing) = types.iter().find(|t| t.name == name) {
            return Ok(existing.clone());
        }
        let pet_type = PetType {
            id: Some(ObjectId::new()),
            name: name.to_string(),
        };
        types.push(pet_type.clone());
        Ok(pet_type)
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {

    async fn find_pet_types(&self) -> Result<Vec<PetType>, ApiError> {
        let types = self.db.types.read().map_err(lock_error)?;
        let mut sorted = types.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sorted)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Pet>, ApiError> {
        let pets = self.db.pets.read().map_err(lock_error)?;
        Ok(pets.get(&id).cloned())
    }

    async fn save(&self, mut pet: Pet) -> Result<Pet, ApiError> {
        let id = *pet.id.get_or_insert_with(ObjectId::new);
        let mut pets = self.db.pets.write().map_err(lock_error)?;
        pets.insert(id, pet.clone());
        Ok(pet)
    }
}
