mod helpers;
mod test_places_tags;
mod test_rate_limit;
