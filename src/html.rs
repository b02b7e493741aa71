use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::endpoints;

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "button button-primary";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "form-container";
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";

// Table styles
pub const TABLE_STYLE: &str = "transaction-table";
pub const TABLE_HEADER_STYLE: &str = "transaction-table-header";
pub const TABLE_ROW_STYLE: &str = "transaction-row";
pub const TABLE_CELL_STYLE: &str = "table-cell";
pub const TABLE_EMPTY_ROW_STYLE: &str = "transaction-row-empty";

// Amount styles
pub const INCOME_AMOUNT_STYLE: &str = "amount amount-income";
pub const EXPENSE_AMOUNT_STYLE: &str = "amount amount-expense";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "page-container";

const HTMX_SCRIPT: &str = "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js";
const HTMX_RESPONSE_TARGETS_SCRIPT: &str =
    "https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.min.js";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Finance Tracker" }
                link href=(format!("{}/main.css", endpoints::STATIC)) rel="stylesheet";

                script src=(HTMX_SCRIPT) {}
                script src=(HTMX_RESPONSE_TARGETS_SCRIPT) {}
            }

            body hx-ext="response-targets"
            {
                (content)

                // Alert container for swapped in error messages
                div id="alert-container" class="alert-container" {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error-page"
        {
            h1 class="error-status" { (header) }

            p class="error-description" { (description) }

            p class="error-fix" { (fix) }

            a href=(endpoints::TRANSACTIONS_VIEW) class=(BUTTON_PRIMARY_STYLE)
            {
                "Back to Transactions"
            }
        }
    );

    base(title, &content)
}

/// Format `amount` as dollars with thousands separators, e.g. "-$1,234.50".
pub fn format_currency(amount: Decimal) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("\"$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("\"-$\" is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    let Some(number) = amount.to_f64() else {
        return format!("${amount}");
    };

    let formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    };

    pad_cents(formatted_string)
}

/// numfmt drops trailing zeros, so "12.30" comes out as "12.3" and "12.00" as "12".
fn pad_cents(mut text: String) -> String {
    let decimals = match text.rfind('.') {
        Some(point) => text.len() - point - 1,
        None => {
            text.push('.');
            0
        }
    };

    for _ in decimals..2 {
        text.push('0');
    }

    text
}
