use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

use crate::infrastructure::database::mongo_context::MongoContext;
use crate::domain::pet::repository::PetRepository;
use crate::domain::pet::model::{Pet, PetType};
use crate::utils::errors::ApiError;

pub const PETS_COLLECTION: &str = "pets";
pub const TYPES_COLLECTION: &str = "types";

pub struct MongoPetRepository {
    pets: mongodb::Collection<Pet>,
    types: mongodb::Collection<PetType>
}

impl MongoPetRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            pets: context.collection(PETS_COLLECTION),
            types: context.collection(TYPES_COLLECTION)
        }
    }
}

#[async_trait]
impl PetRepository for MongoPetRepository {

    async fn find_pet_types(&self) -> Result<Vec<PetType>, ApiError> {
        let mut cursor = self.types
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?;
        let mut types = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(pet_type) => types.push(pet_type),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(types)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Pet>, ApiError> {
        Ok(self.pets.find_one(doc! { "_id": id }).await?)
    }

    async fn save(&self, mut pet: Pet) -> Result<Pet, ApiError> {
        match pet.id {
            Some(id) => {
                self.pets
                    .replace_one(doc! { "_id": id }, &pet)
                    .upsert(true)
                    .await?;
            },
            None => {
                let result = self.pets.insert_one(&pet).await?;
                let id = result.inserted_id.as_object_id().ok_or_else(|| {
                    ApiError::InternalServerError("Inserted pet has no ObjectId".to_string())
                })?;
                pet.id = Some(id);
            }
        }
        log::debug!("Stored pet {:?} ({})", pet.id, pet.name);
        Ok(pet)
    }
}
