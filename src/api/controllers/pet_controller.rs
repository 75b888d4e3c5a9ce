use std::collections::HashMap;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::api::binder::{bind_owner, bind_pet};
use crate::domain::{Owner, Pet, PetType};
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::pet::repository::PetRepository;
use crate::domain::pet::validator::{BindingResult, FieldError, DUPLICATE};
use crate::utils::errors::ApiError;

pub const VIEWS_PETS_CREATE_OR_UPDATE_FORM: &str = "pets/createOrUpdatePetForm";

/// What a pet form request resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum PetView {
    /// Render the create/edit form for `pet`, with any field errors.
    Form { pet: Pet, errors: Vec<FieldError> },
    /// Redirect the client to the given path.
    Redirect(String),
}

/// Create and edit workflow for pets belonging to an owner.
#[derive(Clone)]
pub struct PetController {
    pets: Arc<dyn PetRepository>,
    owners: Arc<dyn OwnerRepository>
}

impl PetController {

    pub fn new(pets: Arc<dyn PetRepository>, owners: Arc<dyn OwnerRepository>) -> Self {
        PetController { pets, owners }
    }

    pub async fn load_pet_types(&self) -> Result<Vec<PetType>, ApiError> {
        self.pets.find_pet_types().await
    }

    pub async fn load_owner(&self, owner_id: ObjectId) -> Result<Owner, ApiError> {
        self.owners
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Owner {} not found", owner_id.to_hex())))
    }

    pub fn bind_owner_input(&self, owner: &mut Owner, params: &HashMap<String, String>) {
        bind_owner(owner, params);
    }

    pub fn bind_pet_input(&self, pet: &mut Pet, params: &HashMap<String, String>, types: &[PetType]) -> BindingResult {
        bind_pet(pet, params, types)
    }

    pub fn show_create_form(&self, owner: &mut Owner) -> PetView {
        let mut pet = Pet::new();
        owner.add_pet(&mut pet);
        PetView::Form { pet, errors: Vec::new() }
    }

    pub async fn submit_create_form(
        &self,
        owner: &mut Owner,
        mut pet: Pet,
        mut result: BindingResult
    ) -> Result<PetView, ApiError> {
        if !pet.name.is_empty() && pet.is_new() && owner.get_pet(&pet.name, true).is_some() {
            result.reject_value("name", DUPLICATE, "already exists", Some(pet.name.clone()));
        }

        owner.add_pet(&mut pet);

        if result.has_errors() {
            log::debug!("Rejected new pet '{}': {} field error(s)", pet.name, result.errors.len());
            return Ok(PetView::Form { pet, errors: result.into_errors() });
        }

        let saved = self.pets.save(pet).await?;
        log::info!("Created pet {:?} '{}' for owner {:?}", saved.id, saved.name, owner.id);
        Ok(PetView::Redirect(owner_location(owner)?))
    }

    pub async fn load_pet(&self, pet_id: ObjectId) -> Result<Pet, ApiError> {
        self.pets
            .find_by_id(pet_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Pet {} not found", pet_id.to_hex())))
    }

    pub async fn show_edit_form(&self, pet_id: ObjectId) -> Result<PetView, ApiError> {
        let pet = self.load_pet(pet_id).await?;
        Ok(PetView::Form { pet, errors: Vec::new() })
    }

    pub async fn submit_edit_form(
        &self,
        mut pet: Pet,
        result: BindingResult,
        owner: &mut Owner
    ) -> Result<PetView, ApiError> {
        if result.has_errors() {
            pet.owner_id = owner.id;
            return Ok(PetView::Form { pet, errors: result.into_errors() });
        }

        owner.add_pet(&mut pet);
        let saved = self.pets.save(pet).await?;
        log::info!("Updated pet {:?} '{}' for owner {:?}", saved.id, saved.name, owner.id);
        Ok(PetView::Redirect(owner_location(owner)?))
    }
}

fn owner_location(owner: &Owner) -> Result<String, ApiError> {
    owner.id
        .map(|id| format!("/owners/{}", id.to_hex()))
        .ok_or_else(|| ApiError::InternalServerError("Owner has no identifier".to_string()))
}
