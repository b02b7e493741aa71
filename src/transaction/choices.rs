//! The fixed sets of values allowed for a transaction's type and category.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// A value that is not one of the allowed choices for a field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidChoice(pub String);

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money was earned.
    Income,
    /// Money was spent.
    Expense,
}

impl TransactionType {
    /// Every transaction type, in display order.
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// The label used in the database, the JSON API and the HTML views.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = InvalidChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|choice| choice.as_str() == value)
            .ok_or_else(|| InvalidChoice(value.to_owned()))
    }
}

/// What a transaction was for.
///
/// The category is not checked against the [TransactionType], so an income
/// may use an expense category such as [Category::Rent].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Wages.
    Salary,
    /// Money from friends or family.
    Gift,
    /// Returns from investments and the like.
    Earnings,
    /// Groceries and eating out.
    Food,
    /// Rent.
    Rent,
    /// Utilities, transport, cosmetics, etc.
    Personal,
    /// Money put into investments.
    Investment,
    /// Money put aside.
    Savings,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Category::Salary,
        Category::Gift,
        Category::Earnings,
        Category::Food,
        Category::Rent,
        Category::Personal,
        Category::Investment,
        Category::Savings,
    ];

    /// The label used in the database, the JSON API and the HTML views.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Gift => "Gift",
            Category::Earnings => "Earnings",
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Personal => "Personal",
            Category::Investment => "Investment",
            Category::Savings => "Savings",
        }
    }

    /// Whether the category is usually paired with income.
    ///
    /// Only used to group the choices in forms.
    pub fn is_income_category(self) -> bool {
        matches!(
            self,
            Category::Salary | Category::Gift | Category::Earnings
        )
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|choice| choice.as_str() == value)
            .ok_or_else(|| InvalidChoice(value.to_owned()))
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, InvalidChoice, TransactionType};

    #[test]
    fn parses_every_label() {
        for choice in TransactionType::ALL {
            assert_eq!(choice.as_str().parse::<TransactionType>(), Ok(choice));
        }

        for choice in Category::ALL {
            assert_eq!(choice.as_str().parse::<Category>(), Ok(choice));
        }
    }

    #[test]
    fn rejects_unknown_transaction_type() {
        assert_eq!(
            "Refund".parse::<TransactionType>(),
            Err(InvalidChoice("Refund".to_owned()))
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert!("income".parse::<TransactionType>().is_err());
        assert!("FOOD".parse::<Category>().is_err());
    }

    #[test]
    fn invalid_choice_message_names_the_value() {
        let error = "Lottery".parse::<Category>().unwrap_err();

        assert_eq!(error.to_string(), "\"Lottery\" is not a valid choice.");
    }

    #[test]
    fn serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Expense).unwrap(),
            "\"Expense\""
        );
        assert_eq!(
            serde_json::to_string(&Category::Investment).unwrap(),
            "\"Investment\""
        );
    }
}
