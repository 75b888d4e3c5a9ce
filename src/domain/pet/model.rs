use chrono::NaiveDate;
use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PetType {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
}

impl PetType {
    pub fn new(name: &str) -> Self {
        PetType {
            id: None,
            name: name.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Pet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetType>,
    pub owner_id: Option<ObjectId>,
}

impl Pet {
    pub fn new() -> Self {
        Pet::default()
    }

    /// A pet stays new until the repository assigns it an id.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
