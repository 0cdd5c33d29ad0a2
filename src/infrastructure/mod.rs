pub mod cache;
pub mod database;
pub mod places;
pub mod repositories;
pub mod security;
