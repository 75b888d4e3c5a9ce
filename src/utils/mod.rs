pub mod apm;
pub mod config;
pub mod errors;
pub mod logging;
