pub mod pet_controller;
