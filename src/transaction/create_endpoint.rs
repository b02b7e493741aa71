//! Defines the JSON endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRef, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    transaction::{
        core::create_transaction,
        payload::{Completion, TransactionPayload},
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction from a JSON body.
///
/// Responds with 201 Created, the saved transaction and its URL in the
/// `Location` header.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    body: Bytes,
) -> Result<Response, Error> {
    let builder = TransactionPayload::from_json(&body)?.complete(Completion::Create)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(builder, &connection)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(transaction)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Bytes, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        test_utils::get_header,
        transaction::{
            Category, TransactionType, count_transactions,
            create_endpoint::{CreateTransactionState, create_transaction_endpoint},
            get_transaction,
        },
    };

    fn get_test_state() -> CreateTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();
        let body = Bytes::from_static(
            br#"{"owner": "Alice", "transaction_type": "Expense", "amount": "12.30",
                 "date": "2025-10-05", "category": "Food", "description": "test transaction"}"#,
        );

        let response = create_transaction_endpoint(State(state.clone()), body)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(get_header(&response, "location"), "/api/transactions/1");
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.owner, "Alice");
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.amount.value(), dec!(12.30));
        assert_eq!(transaction.date, date!(2025 - 10 - 05));
        assert_eq!(transaction.category, Category::Food);
        assert_eq!(transaction.description, "test transaction");
    }

    #[tokio::test]
    async fn invalid_transaction_is_not_saved() {
        let state = get_test_state();
        let body = Bytes::from_static(
            br#"{"owner": "Alice", "transaction_type": "Refund", "amount": "12.30",
                 "date": "2025-10-05", "category": "Food"}"#,
        );

        let result = create_transaction_endpoint(State(state.clone()), body).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection), Ok(0));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let state = get_test_state();

        let result =
            create_transaction_endpoint(State(state), Bytes::from_static(b"not json")).await;

        assert!(matches!(result, Err(Error::MalformedBody(_))));
    }
}
