pub mod add_place;
pub mod cast_vote;
pub mod create_tag;
pub mod list_places;
pub mod list_tags;
pub mod place_lookup;
pub mod users;
