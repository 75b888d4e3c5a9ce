pub mod model;
pub mod repository;
pub mod validator;
