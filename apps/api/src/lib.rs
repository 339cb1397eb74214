pub mod config;
pub mod db;
pub mod errors;
pub mod events;
pub mod intake;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod stages;
pub mod state;
pub mod store;
