//! Tag input records and name validation

use super::ValidationError;

const MAX_TAG_NAME_LEN: usize = 128;

/// Validated tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    /// Create a new tag name: non-empty, max 128 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "tag name" });
        }

        if s.len() > MAX_TAG_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "tag name",
                max: MAX_TAG_NAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Input record for creating or renaming a tag.
#[derive(Debug, Clone)]
pub struct TagInput {
    pub name: TagName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        let err = TagName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn accepts_plain_names() {
        assert!(TagName::new("fire").is_ok());
        assert!(TagName::new("season one").is_ok());
    }
}
