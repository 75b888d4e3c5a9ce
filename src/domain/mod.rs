pub mod owner;
pub mod pet;

pub use owner::model::Owner;
pub use pet::model::{Pet, PetType};
