use crate::domain::shared::errors::DomainError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Leading phrases a tag may start with; the user supplies the keyword.
pub const RANKING_PHRASES: &[&str] = &[
    "Best",
    "Worst",
    "Top",
    "Most Popular",
    "Most Loved",
    "Most Overrated",
    "Most Underrated",
    "Cheapest",
    "Most Expensive",
    "Hidden Gem",
];

pub const MAX_TAG_NAME_LENGTH: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TagKeyword {
    #[validate(length(min = 3, max = 20))]
    pub value: String,
}

impl TagKeyword {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let keyword = Self { value };
        keyword.validate()?;
        Ok(keyword)
    }
}

/// Full tag name, `"<phrase> <keyword>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagName(String);

impl TagName {
    pub fn compose(phrase: &str, keyword: &str) -> Result<Self, DomainError> {
        if !RANKING_PHRASES.contains(&phrase) {
            return Err(DomainError::ValidationError("Invalid phrase.".into()));
        }
        let keyword = TagKeyword::new(keyword.trim().to_string())
            .map_err(|_| DomainError::ValidationError("Invalid keyword.".into()))?;
        Ok(Self(format!("{} {}", phrase, keyword.value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
