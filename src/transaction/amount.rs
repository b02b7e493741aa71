//! Fixed-point money amounts.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The maximum number of digits in an amount, on both sides of the decimal point.
pub const MAX_DIGITS: u32 = 10;
/// The maximum number of digits after the decimal point.
pub const DECIMAL_PLACES: u32 = 2;

/// The ways an amount can fail to fit the fixed-point format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The text is not a decimal number.
    #[error("A valid number is required.")]
    NotANumber,
    /// More than [MAX_DIGITS] digits.
    #[error("Ensure that there are no more than {MAX_DIGITS} digits in total.")]
    TooManyDigits,
    /// More than [DECIMAL_PLACES] digits after the decimal point.
    #[error("Ensure that there are no more than {DECIMAL_PLACES} decimal places.")]
    TooManyDecimalPlaces,
    /// More than `MAX_DIGITS - DECIMAL_PLACES` digits before the decimal point.
    #[error("Ensure that there are no more than {} digits before the decimal point.", MAX_DIGITS - DECIMAL_PLACES)]
    TooManyWholeDigits,
}

/// An amount of money with at most ten digits, two of them after the decimal point.
///
/// The value is always held with a scale of exactly two, so `12.5` and
/// `12.50` are stored and displayed as `12.50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Check `value` against the fixed-point format.
    ///
    /// Digits are counted as written: `1.230` has three decimal places even
    /// though the last one is zero. Leading zeros and the sign are not counted.
    ///
    /// # Errors
    /// Returns the first [AmountError] the value violates, checking total
    /// digits, then decimal places, then whole digits.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        let decimal_places = value.scale();
        let significant_digits = count_digits(value.mantissa().unsigned_abs());
        let digits = significant_digits.max(decimal_places);
        let whole_digits = digits - decimal_places;

        if digits > MAX_DIGITS {
            return Err(AmountError::TooManyDigits);
        }

        if decimal_places > DECIMAL_PLACES {
            return Err(AmountError::TooManyDecimalPlaces);
        }

        if whole_digits > MAX_DIGITS - DECIMAL_PLACES {
            return Err(AmountError::TooManyWholeDigits);
        }

        let mut value = value;
        value.rescale(DECIMAL_PLACES);

        Ok(Self(value))
    }

    /// The underlying decimal value.
    pub fn value(self) -> Decimal {
        self.0
    }
}

fn count_digits(mut mantissa: u128) -> u32 {
    let mut digits = 1;

    while mantissa >= 10 {
        mantissa /= 10;
        digits += 1;
    }

    digits
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();

        if !is_plain_decimal(text) {
            return Err(AmountError::NotANumber);
        }

        let value = Decimal::from_str(text).map_err(|_| AmountError::NotANumber)?;

        Amount::new(value)
    }
}

/// An optional sign, then digits with at most one decimal point.
///
/// `Decimal::from_str` also accepts `_` separators, which are not allowed here.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut decimal_points = 0;

    unsigned.chars().any(|c| c.is_ascii_digit())
        && unsigned.chars().all(|c| match c {
            '.' => {
                decimal_points += 1;
                decimal_points == 1
            }
            c => c.is_ascii_digit(),
        })
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// An amount as it appears in a request, before it has been checked.
///
/// JSON clients may send either `"12.50"` or `12.5`; HTML forms always send text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// An amount sent as a string.
    Text(String),
    /// An amount sent as a JSON number.
    Number(serde_json::Number),
}

impl RawAmount {
    /// Parse and check the amount.
    ///
    /// # Errors
    /// Returns an [AmountError] if the value is not a number or does not fit
    /// the fixed-point format.
    pub fn parse(&self) -> Result<Amount, AmountError> {
        match self {
            RawAmount::Text(text) => text.parse(),
            RawAmount::Number(number) => number.to_string().parse(),
        }
    }
}

// Written as a string so trailing zeros survive, e.g. "12.50".
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawAmount::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Text(self.0.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal_macros::dec;

    use super::{Amount, AmountError, RawAmount};

    #[test]
    fn accepts_two_decimal_places() {
        let amount: Amount = "12.34".parse().unwrap();

        assert_eq!(amount.value(), dec!(12.34));
    }

    #[test]
    fn pads_to_two_decimal_places() {
        assert_eq!("12.5".parse::<Amount>().unwrap().to_string(), "12.50");
        assert_eq!("7".parse::<Amount>().unwrap().to_string(), "7.00");
    }

    #[test]
    fn rejects_three_decimal_places() {
        assert_eq!(
            "1.234".parse::<Amount>(),
            Err(AmountError::TooManyDecimalPlaces)
        );
    }

    #[test]
    fn trailing_zeros_count_as_decimal_places() {
        assert_eq!(
            "1.230".parse::<Amount>(),
            Err(AmountError::TooManyDecimalPlaces)
        );
    }

    #[test]
    fn rejects_more_than_ten_digits() {
        assert_eq!(
            "123456789.12".parse::<Amount>(),
            Err(AmountError::TooManyDigits)
        );
        assert_eq!(
            "12345678901".parse::<Amount>(),
            Err(AmountError::TooManyDigits)
        );
    }

    #[test]
    fn rejects_more_than_eight_whole_digits() {
        assert_eq!(
            "123456789".parse::<Amount>(),
            Err(AmountError::TooManyWholeDigits)
        );
    }

    #[test]
    fn accepts_largest_value() {
        assert_eq!(
            "99999999.99".parse::<Amount>().unwrap().value(),
            dec!(99999999.99)
        );
        assert_eq!(
            "-99999999.99".parse::<Amount>().unwrap().value(),
            dec!(-99999999.99)
        );
    }

    #[test]
    fn leading_zeros_are_not_counted() {
        assert!("0000000012.50".parse::<Amount>().is_ok());
        assert!("0.05".parse::<Amount>().is_ok());
    }

    #[test]
    fn rejects_underscores() {
        assert_eq!("1_000".parse::<Amount>(), Err(AmountError::NotANumber));
        assert_eq!("1_000.00".parse::<Amount>(), Err(AmountError::NotANumber));
    }

    #[test]
    fn rejects_anything_but_sign_digits_and_one_point() {
        for text in ["1.2.3", "1e3", "--1", "1-", "$5", ".", "-", "1 000"] {
            assert_eq!(
                text.parse::<Amount>(),
                Err(AmountError::NotANumber),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn accepts_signs_and_bare_points() {
        assert_eq!("+5".parse::<Amount>().unwrap().value(), dec!(5.00));
        assert_eq!("-5".parse::<Amount>().unwrap().value(), dec!(-5.00));
        assert_eq!(" 12.5 ".parse::<Amount>().unwrap().value(), dec!(12.50));
    }

    #[test]
    fn rejects_text() {
        assert_eq!("twelve".parse::<Amount>(), Err(AmountError::NotANumber));
        assert_eq!("".parse::<Amount>(), Err(AmountError::NotANumber));
    }

    #[test]
    fn raw_number_and_text_parse_the_same() {
        let text: RawAmount = serde_json::from_str("\"12.5\"").unwrap();
        let number: RawAmount = serde_json::from_str("12.5").unwrap();

        assert_eq!(text.parse(), number.parse());
    }

    #[test]
    fn raw_number_with_three_decimal_places_is_rejected() {
        let number: RawAmount = serde_json::from_str("12.345").unwrap();

        assert_eq!(number.parse(), Err(AmountError::TooManyDecimalPlaces));
    }

    #[test]
    fn serializes_as_string() {
        let amount: Amount = "-3.1".parse().unwrap();

        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"-3.10\"");
    }

    #[test]
    fn reads_back_from_sqlite_exactly() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute("CREATE TABLE money (amount TEXT NOT NULL)", ())
            .unwrap();
        let amount: Amount = "1234.10".parse().unwrap();

        connection
            .execute("INSERT INTO money (amount) VALUES (?1)", (amount,))
            .unwrap();
        let got: Amount = connection
            .query_row("SELECT amount FROM money", [], |row| row.get(0))
            .unwrap();

        assert_eq!(got, amount);
        assert_eq!(got.to_string(), "1234.10");
    }
}
