//! Event input records and name validation

use chrono::{DateTime, Utc};

use super::ValidationError;

const MAX_EVENT_NAME_LEN: usize = 128;

/// Validated event name. Event names are globally unique in storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName(String);

impl EventName {
    /// Create a new event name: non-empty, max 128 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "event name" });
        }

        if s.len() > MAX_EVENT_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "event name",
                max: MAX_EVENT_NAME_LEN,
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

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Input record for creating or updating an event.
///
/// `card_ids` fully describes the event's card links; on write the stored
/// set is replaced, not merged. Open-ended events leave the time bounds
/// unset.
#[derive(Debug, Clone)]
pub struct EventInput {
    pub name: EventName,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub default: bool,
    pub card_ids: Vec<i32>,
}

impl EventInput {
    /// Input with the given name, no description, open time bounds, not
    /// the default event, and no card links.
    pub fn named(name: EventName) -> Self {
        Self {
            name,
            description: None,
            start_time: None,
            end_time: None,
            default: false,
            card_ids: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        let err = EventName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn named_defaults() {
        let input = EventInput::named(EventName::new("launch week").unwrap());
        assert!(!input.default);
        assert!(input.start_time.is_none());
        assert!(input.end_time.is_none());
        assert!(input.card_ids.is_empty());
    }
}
