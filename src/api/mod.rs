pub mod binder;
pub mod controllers;
pub mod handlers;
pub mod state;
