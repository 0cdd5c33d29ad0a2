pub mod sanitizer;

pub use sanitizer::{sanitize, sanitize_optional, sanitize_tag_list};
