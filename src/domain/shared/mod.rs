pub mod errors;
pub mod geo;
pub mod pagination;
