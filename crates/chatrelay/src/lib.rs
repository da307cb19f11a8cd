pub mod errors;
pub mod key_manager;
pub mod limits;
pub mod models;
pub mod profile;
pub mod providers;
pub mod relay;
pub mod translate;
