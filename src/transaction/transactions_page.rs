//! Defines the route handler for the page that lists every transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, EXPENSE_AMOUNT_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, INCOME_AMOUNT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_EMPTY_ROW_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, base,
        format_currency,
    },
    transaction::{
        Category, Transaction, TransactionType,
        core::get_all_transactions,
        validation::{DESCRIPTION_MAX_LENGTH, OWNER_MAX_LENGTH},
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render every transaction as an HTML table, in the order they were created.
pub async fn get_transactions_page(State(state): State<TransactionsPageState>) -> Response {
    let transactions = {
        let connection = match state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        {
            Ok(connection) => connection,
            Err(_) => return Error::DatabaseLockError.into_page_response(),
        };

        match get_all_transactions(&connection) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::error!("Failed to retrieve transactions: {error}");
                return error.into_page_response();
            }
        }
    };

    transactions_view(&transactions).into_response()
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let table_row = |transaction: &Transaction| {
        let amount_style = match transaction.transaction_type {
            TransactionType::Income => INCOME_AMOUNT_STYLE,
            TransactionType::Expense => EXPENSE_AMOUNT_STYLE,
        };

        html!(
            tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
            {
                td class=(TABLE_CELL_STYLE) { (transaction.owner) }
                td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
                td class=(format!("{TABLE_CELL_STYLE} {amount_style}"))
                {
                    (format_currency(transaction.amount.value()))
                }
                td class=(TABLE_CELL_STYLE) { (transaction.date) }
                td class=(TABLE_CELL_STYLE) { (transaction.category) }
                td class=(TABLE_CELL_STYLE) { (transaction.description) }
            }
        )
    };

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section
            {
                h1 { "Transactions" }

                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            @for heading in ["Owner", "Type", "Amount", "Date", "Category", "Description"] {
                                th scope="col" class=(TABLE_CELL_STYLE) { (heading) }
                            }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (table_row(transaction))
                        }

                        @if transactions.is_empty() {
                            tr class=(TABLE_EMPTY_ROW_STYLE)
                            {
                                td colspan="6" class=(TABLE_CELL_STYLE)
                                {
                                    "No transactions yet. Add one below."
                                }
                            }
                        }
                    }
                }
            }

            (new_transaction_form())
        }
    );

    base("Transactions", &content)
}

fn new_transaction_form() -> Markup {
    let (income_categories, expense_categories): (Vec<Category>, Vec<Category>) = Category::ALL
        .into_iter()
        .partition(|category| category.is_income_category());

    html!(
        section class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::TRANSACTIONS_VIEW)
                hx-target-error="#alert-container"
            {
                h2 { "New Transaction" }

                div
                {
                    label for="owner" class=(FORM_LABEL_STYLE) { "Owner" }

                    input
                        name="owner"
                        id="owner"
                        type="text"
                        maxlength=(OWNER_MAX_LENGTH)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="transaction_type" class=(FORM_LABEL_STYLE) { "Type" }

                    select
                        name="transaction_type"
                        id="transaction_type"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for transaction_type in TransactionType::ALL {
                            option value=(transaction_type) { (transaction_type) }
                        }
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        name="category"
                        id="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        optgroup label="Income"
                        {
                            @for category in &income_categories {
                                option value=(category) { (category) }
                            }
                        }

                        optgroup label="Expenses"
                        {
                            @for category in &expense_categories {
                                option value=(category) { (category) }
                            }
                        }
                    }
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        maxlength=(DESCRIPTION_MAX_LENGTH)
                        placeholder="Description"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
            }
        }
    )
}
