pub mod config;
pub mod error;
pub mod events;
pub mod gesture;
pub mod mercator;
pub mod models;
pub mod spring;
pub mod state;
pub mod store;
