pub mod health;
pub mod places;
pub mod tags;
pub mod users;
pub mod votes;
