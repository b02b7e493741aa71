//! Converts request bodies into checked transaction fields.

use serde::Deserialize;
use serde_json::Value;
use time::{Date, macros::format_description};

use crate::{
    Error,
    transaction::{
        amount::{Amount, AmountError},
        choices::{Category, TransactionType},
        core::{Transaction, TransactionBuilder},
        validation::{
            DATE_FORMAT_MESSAGE, NOT_A_STRING_MESSAGE, REQUIRED_MESSAGE, ValidationError,
            clean_description, clean_owner,
        },
    },
};

/// A single field as sent by a client, before its type is checked.
///
/// HTML forms always send text. JSON clients may send any value, which is
/// kept as is so that a value of the wrong type is reported against its field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// A string, from a form or a JSON string.
    Text(String),
    /// Any other JSON value.
    Json(Value),
}

impl RawField {
    /// The text of a string or number, as a text field would store it.
    fn to_text(&self) -> Result<String, String> {
        match self {
            RawField::Text(text) => Ok(text.clone()),
            RawField::Json(Value::Number(number)) => Ok(number.to_string()),
            RawField::Json(_) => Err(NOT_A_STRING_MESSAGE.to_owned()),
        }
    }

    /// The value as it should be quoted back to the client in an error message.
    fn to_choice_text(&self) -> String {
        match self {
            RawField::Text(text) => text.clone(),
            RawField::Json(value) => value.to_string(),
        }
    }

    fn parse_choice<T>(&self) -> Result<T, String>
    where
        T: std::str::FromStr,
        T::Err: ToString,
    {
        self.to_choice_text()
            .parse::<T>()
            .map_err(|error| error.to_string())
    }

    fn parse_amount(&self) -> Result<Amount, String> {
        let amount = match self {
            RawField::Text(text) => text.parse(),
            RawField::Json(Value::Number(number)) => number.to_string().parse(),
            RawField::Json(_) => Err(AmountError::NotANumber),
        };

        amount.map_err(|error| error.to_string())
    }

    fn parse_date(&self) -> Result<Date, String> {
        match self {
            RawField::Text(text) => parse_date(text),
            RawField::Json(_) => Err(DATE_FORMAT_MESSAGE.to_owned()),
        }
    }
}

/// The fields of a transaction as sent by a client, before any checks.
///
/// Every field is optional so that partial updates can be expressed. Unknown
/// fields, including `id`, are ignored and `null` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionPayload {
    /// Who the transaction belongs to.
    #[serde(default)]
    pub owner: Option<RawField>,
    /// "Income" or "Expense".
    #[serde(default)]
    pub transaction_type: Option<RawField>,
    /// A decimal number as a string or JSON number.
    #[serde(default)]
    pub amount: Option<RawField>,
    /// A date in the format YYYY-MM-DD.
    #[serde(default)]
    pub date: Option<RawField>,
    /// One of the category labels, e.g. "Food".
    #[serde(default)]
    pub category: Option<RawField>,
    /// A short note.
    #[serde(default)]
    pub description: Option<RawField>,
}

/// How missing fields in a [TransactionPayload] are filled in.
#[derive(Debug, Clone, Copy)]
pub enum Completion<'a> {
    /// A new transaction: every required field must be given.
    Create,
    /// Replace an existing transaction: every required field must be given,
    /// but a missing description keeps its current value.
    Replace(&'a Transaction),
    /// Change some fields of an existing transaction and keep the rest.
    Patch(&'a Transaction),
}

impl<'a> Completion<'a> {
    fn current(self) -> Option<&'a Transaction> {
        match self {
            Completion::Patch(transaction) => Some(transaction),
            Completion::Create | Completion::Replace(_) => None,
        }
    }

    fn current_description(self) -> String {
        match self {
            Completion::Create => String::new(),
            Completion::Replace(transaction) | Completion::Patch(transaction) => {
                transaction.description.clone()
            }
        }
    }
}

impl TransactionPayload {
    /// Parse a JSON request body.
    ///
    /// # Errors
    /// Returns [Error::MalformedBody] if the body is not JSON or not a JSON
    /// object. Fields of the wrong type are left for [Self::complete] to report.
    pub fn from_json(body: &[u8]) -> Result<Self, Error> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|error| Error::MalformedBody(format!("JSON parse error - {error}")))?;

        if !value.is_object() {
            return Err(Error::MalformedBody(
                "Invalid data. Expected a JSON object.".to_owned(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|error| Error::MalformedBody(format!("Invalid data - {error}")))
    }

    /// Check every field and fill in missing ones according to `completion`.
    ///
    /// # Errors
    /// Returns a [ValidationError] naming every field that is missing or invalid.
    pub fn complete(self, completion: Completion<'_>) -> Result<TransactionBuilder, ValidationError> {
        let mut errors = ValidationError::default();
        let current = completion.current();

        let owner = resolve_field(
            &mut errors,
            "owner",
            self.owner
                .as_ref()
                .map(|owner| owner.to_text().and_then(|text| clean_owner(&text))),
            current.map(|transaction| transaction.owner.clone()),
        );
        let transaction_type = resolve_field(
            &mut errors,
            "transaction_type",
            self.transaction_type
                .as_ref()
                .map(RawField::parse_choice::<TransactionType>),
            current.map(|transaction| transaction.transaction_type),
        );
        let amount = resolve_field(
            &mut errors,
            "amount",
            self.amount.as_ref().map(RawField::parse_amount),
            current.map(|transaction| transaction.amount),
        );
        let date = resolve_field(
            &mut errors,
            "date",
            self.date.as_ref().map(RawField::parse_date),
            current.map(|transaction| transaction.date),
        );
        let category = resolve_field(
            &mut errors,
            "category",
            self.category
                .as_ref()
                .map(RawField::parse_choice::<Category>),
            current.map(|transaction| transaction.category),
        );
        let description = resolve_field(
            &mut errors,
            "description",
            self.description.as_ref().map(|description| {
                description
                    .to_text()
                    .and_then(|text| clean_description(&text))
            }),
            Some(completion.current_description()),
        );

        match (owner, transaction_type, amount, date, category, description) {
            (
                Some(owner),
                Some(transaction_type),
                Some(amount),
                Some(date),
                Some(category),
                Some(description),
            ) if errors.is_empty() => Ok(TransactionBuilder {
                owner,
                transaction_type,
                amount,
                date,
                category,
                description,
            }),
            _ => Err(errors),
        }
    }
}

/// Pick the given value, falling back to `current`, and record any failure.
fn resolve_field<T>(
    errors: &mut ValidationError,
    field: &'static str,
    given: Option<Result<T, String>>,
    current: Option<T>,
) -> Option<T> {
    match (given, current) {
        (Some(Ok(value)), _) => Some(value),
        (Some(Err(message)), _) => {
            errors.add(field, message);
            None
        }
        (None, Some(value)) => Some(value),
        (None, None) => {
            errors.add(field, REQUIRED_MESSAGE);
            None
        }
    }
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| DATE_FORMAT_MESSAGE.to_owned())
}
