pub mod catalog;

pub mod config;
pub use config::{AppConfigImpl, CatalogConfig};

pub mod db;

pub mod event_bus;

pub mod repository;
pub use repository::Repositories;
