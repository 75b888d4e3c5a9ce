use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;

use crate::domain::pet::model::Pet;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Owner {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {

    /// Points the pet back at this owner. Only new pets are appended to the
    /// owner's collection; saved pets are already part of it.
    pub fn add_pet(&mut self, pet: &mut Pet) {
        pet.owner_id = self.id;
        if pet.is_new() {
            self.pets.push(pet.clone());
        }
    }

    /// Case-insensitive lookup by name. With `ignore_new` set, pets that have
    /// not been saved yet are skipped.
    pub fn get_pet(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        let wanted = name.to_lowercase();
        self.pets
            .iter()
            .filter(|pet| !ignore_new || !pet.is_new())
            .find(|pet| pet.name.to_lowercase() == wanted)
    }

}
