pub mod cached;
pub mod google_places;
pub mod traits;
