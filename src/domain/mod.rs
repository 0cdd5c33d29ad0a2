pub mod place;
pub mod shared;
pub mod tag;
pub mod user;
pub mod vote;
