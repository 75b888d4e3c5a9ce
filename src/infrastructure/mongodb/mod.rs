pub mod owner_repository;
pub mod pet_repository;
