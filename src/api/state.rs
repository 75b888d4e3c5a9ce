use std::sync::Arc;

use crate::{api::controllers::pet_controller::PetController, domain::{owner::repository::OwnerRepository, pet::repository::PetRepository}};

#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<dyn PetRepository>,
    pub owners: Arc<dyn OwnerRepository>
}

impl AppState {
    pub fn new(pets: Arc<dyn PetRepository>, owners: Arc<dyn OwnerRepository>) -> Self {
        AppState { pets, owners }
    }

    pub fn pet_controller(&self) -> PetController {
        PetController::new(Arc::clone(&self.pets), Arc::clone(&self.owners))
    }
}
