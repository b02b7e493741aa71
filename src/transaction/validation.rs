//! Field level checks for transactions and the error that collects their failures.

use std::collections::BTreeMap;

use serde::Serialize;

/// The maximum number of characters in a transaction's owner.
pub const OWNER_MAX_LENGTH: usize = 30;
/// The maximum number of characters in a transaction's description.
pub const DESCRIPTION_MAX_LENGTH: usize = 40;

pub(crate) const REQUIRED_MESSAGE: &str = "This field is required.";
pub(crate) const BLANK_MESSAGE: &str = "This field may not be blank.";
pub(crate) const NOT_A_STRING_MESSAGE: &str = "Not a valid string.";
pub(crate) const DATE_FORMAT_MESSAGE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// Every field of a candidate transaction that failed validation.
///
/// Serializes as a map from field name to messages, e.g.
/// `{"amount": ["Ensure that there are no more than 2 decimal places."]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationError {
    /// Record `message` against `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Whether no field has failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The messages recorded against `field`, if any.
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterate over the failing fields in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (*field, messages.as_slice()))
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;

        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }

                write!(f, "{field}: {message}")?;
                first = false;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Trim `owner` and check it is not blank and fits in [OWNER_MAX_LENGTH] characters.
pub(crate) fn clean_owner(owner: &str) -> Result<String, String> {
    let owner = owner.trim();

    if owner.is_empty() {
        return Err(BLANK_MESSAGE.to_owned());
    }

    check_length(owner, OWNER_MAX_LENGTH)?;

    Ok(owner.to_owned())
}

/// Trim `description` and check it fits in [DESCRIPTION_MAX_LENGTH] characters.
pub(crate) fn clean_description(description: &str) -> Result<String, String> {
    let description = description.trim();

    check_length(description, DESCRIPTION_MAX_LENGTH)?;

    Ok(description.to_owned())
}

fn check_length(text: &str, max_length: usize) -> Result<(), String> {
    if text.chars().count() > max_length {
        Err(format!(
            "Ensure this field has no more than {max_length} characters."
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ValidationError, clean_description, clean_owner};

    #[test]
    fn owner_is_trimmed() {
        assert_eq!(clean_owner("  Alice "), Ok("Alice".to_owned()));
    }

    #[test]
    fn blank_owner_is_rejected() {
        assert_eq!(
            clean_owner("   "),
            Err("This field may not be blank.".to_owned())
        );
    }

    #[test]
    fn owner_length_counts_characters() {
        let thirty_accents = "é".repeat(30);

        assert_eq!(clean_owner(&thirty_accents), Ok(thirty_accents.clone()));
        assert_eq!(
            clean_owner(&format!("{thirty_accents}é")),
            Err("Ensure this field has no more than 30 characters.".to_owned())
        );
    }

    #[test]
    fn description_may_be_blank() {
        assert_eq!(clean_description(""), Ok(String::new()));
    }

    #[test]
    fn description_longer_than_forty_characters_is_rejected() {
        assert!(clean_description(&"a".repeat(40)).is_ok());
        assert_eq!(
            clean_description(&"a".repeat(41)),
            Err("Ensure this field has no more than 40 characters.".to_owned())
        );
    }

    #[test]
    fn serializes_as_field_map() {
        let mut error = ValidationError::default();
        error.add("owner", "This field is required.");
        error.add("amount", "A valid number is required.");

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({
                "amount": ["A valid number is required."],
                "owner": ["This field is required."],
            })
        );
    }

    #[test]
    fn display_lists_every_message() {
        let mut error = ValidationError::default();
        error.add("date", "bad");
        error.add("category", "worse");

        assert_eq!(error.to_string(), "category: worse; date: bad");
    }
}
