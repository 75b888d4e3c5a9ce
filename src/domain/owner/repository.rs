use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::{domain::owner::model::Owner, utils::errors::ApiError};

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Loads the owner together with all of its pets.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Owner>, ApiError>;
    /// Stores the owner record. Pets are persisted through the pet repository.
    async fn save(&self, owner: Owner) -> Result<Owner, ApiError>;
}
