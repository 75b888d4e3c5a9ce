use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::owner::model::Owner;
use crate::domain::owner::repository::OwnerRepository;
use crate::infrastructure::memory::{lock_error, InMemoryDatabase};
use crate::utils::errors::ApiError;

#[derive(Debug, Clone)]
pub struct InMemoryOwnerRepository {
    db: InMemoryDatabase
}

impl InMemoryOwnerRepository {
    pub fn new(db: InMemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OwnerRepository for InMemoryOwnerRepository {

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Owner>, ApiError> {
        let owner = {
            let owners = self.db.owners.read().map_err(lock_error)?;
            owners.get(&id).cloned()
        };

        let Some(mut owner) = owner else {
            return Ok(None);
        };

        let pets = self.db.pets.read().map_err(lock_error)?;
        owner.pets = pets
            .values()
            .filter(|pet| pet.owner_id == Some(id))
            .cloned()
            .collect();
        owner.pets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Some(owner))
    }

    async fn save(&self, mut owner: Owner) -> Result<Owner, ApiError> {
        let id = *owner.id.get_or_insert_with(ObjectId::new);
        let stored = Owner { pets: Vec::new(), ..owner.clone() };
        let mut owners = self.db.owners.write().map_err(lock_error)?;
        owners.insert(id, stored);
        Ok(owner)
    }
}
