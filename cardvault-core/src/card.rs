//! Card input records and name validation

use super::ValidationError;

/// Maximum length for card names
const MAX_CARD_NAME_LEN: usize = 128;

/// Validated card name.
///
/// Card names are the external lookup key for cards and are globally
/// unique in storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardName(String);

impl CardName {
    /// Create a new card name.
    ///
    /// # Rules
    /// - Must not be empty
    /// - Max 128 characters
    ///
    /// # Example
    /// ```
    /// use cardvault_core::CardName;
    ///
    /// assert!(CardName::new("Goblin").is_ok());
    /// assert!(CardName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "card name" });
        }

        if s.len() > MAX_CARD_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "card name",
                max: MAX_CARD_NAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the card name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CardName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One upgrade requirement: `amount` copies of the card named
/// `requirement_name` are consumed to upgrade the owning card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequirement {
    amount: i32,
    requirement_name: CardName,
}

impl UpgradeRequirement {
    /// Create an upgrade requirement, rejecting negative amounts.
    pub fn new(amount: i32, requirement_name: CardName) -> Result<Self, ValidationError> {
        if amount < 0 {
            return Err(ValidationError::Negative { field: "amount" });
        }

        Ok(Self {
            amount,
            requirement_name,
        })
    }

    pub fn amount(&self) -> i32 {
        self.amount
    }

    pub fn requirement_name(&self) -> &CardName {
        &self.requirement_name
    }
}

/// Input record for creating or updating a card.
///
/// The association lists fully describe the card's links: on write, the
/// stored association sets are replaced by these, not merged.
#[derive(Debug, Clone)]
pub struct CardInput {
    pub name: CardName,
    pub rarity: i32,
    pub tag_ids: Vec<i32>,
    pub event_ids: Vec<i32>,
    pub upgrades: Vec<UpgradeRequirement>,
}

impl CardInput {
    /// Input with the given name and rarity and no associations.
    pub fn bare(name: CardName, rarity: i32) -> Self {
        Self {
            name,
            rarity,
            tag_ids: Vec::new(),
            event_ids: Vec::new(),
            upgrades: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(CardName::new("Goblin").is_ok());
        assert!(CardName::new("Goblin King").is_ok());
        assert!(CardName::new("a").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = CardName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        let name_128 = "a".repeat(128);
        assert!(CardName::new(&name_128).is_ok());

        let name_129 = "a".repeat(129);
        let err = CardName::new(&name_129).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }

    #[test]
    fn upgrade_rejects_negative_amount() {
        let req = CardName::new("Goblin").unwrap();
        let err = UpgradeRequirement::new(-1, req).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
    }

    #[test]
    fn upgrade_accepts_zero_amount() {
        let req = CardName::new("Goblin").unwrap();
        let requirement = UpgradeRequirement::new(0, req).unwrap();
        assert_eq!(requirement.amount(), 0);
    }

    #[test]
    fn bare_input_has_no_associations() {
        let input = CardInput::bare(CardName::new("Goblin").unwrap(), 1);
        assert!(input.tag_ids.is_empty());
        assert!(input.event_ids.is_empty());
        assert!(input.upgrades.is_empty());
    }
}
