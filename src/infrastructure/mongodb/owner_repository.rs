use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{doc, to_document, Document};
use mongodb::bson::oid::ObjectId;

use crate::infrastructure::database::mongo_context::MongoContext;
use crate::infrastructure::mongodb::pet_repository::PETS_COLLECTION;
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::owner::model::Owner;
use crate::domain::pet::model::Pet;
use crate::utils::errors::ApiError;

pub const OWNERS_COLLECTION: &str = "owners";

pub struct MongoOwnerRepository {
    owners: mongodb::Collection<Owner>,
    pets: mongodb::Collection<Pet>
}

impl MongoOwnerRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            owners: context.collection(OWNERS_COLLECTION),
            pets: context.collection(PETS_COLLECTION)
        }
    }

    async fn find_pets_of(&self, owner_id: ObjectId) -> Result<Vec<Pet>, ApiError> {
        let mut cursor = self.pets
            .find(doc! { "owner_id": owner_id })
            .sort(doc! { "name": 1 })
            .await?;
        let mut pets = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(pet) => pets.push(pet),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(pets)
    }
}

/// Pets live in their own collection; the owner document never embeds them.
fn owner_document(owner: &Owner) -> Result<Document, ApiError> {
    let mut document = to_document(owner)?;
    document.remove("pets");
    Ok(document)
}

#[async_trait]
impl OwnerRepository for MongoOwnerRepository {

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Owner>, ApiError> {
        let owner = self.owners.find_one(doc! { "_id": id }).await?;

        if let Some(mut owner) = owner {
            owner.pets = self.find_pets_of(id).await?;
            return Ok(Some(owner));
        }
        Ok(None)
    }

    async fn save(&self, mut owner: Owner) -> Result<Owner, ApiError> {
        let collection = self.owners.clone_with_type::<Document>();
        let document = owner_document(&owner)?;

        match owner.id {
            Some(id) => {
                collection
                    .replace_one(doc! { "_id": id }, document)
                    .upsert(true)
                    .await?;
            },
            None => {
                let result = collection.insert_one(document).await?;
                owner.id = result.inserted_id.as_object_id();
            }
        }
        Ok(owner)
    }
}
