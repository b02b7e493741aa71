//! Defines the endpoint for getting a single transaction as JSON.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionId, core::get_transaction},
};

/// The state needed to retrieve a transaction.
#[derive(Debug, Clone)]
pub struct RetrieveTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RetrieveTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the transaction `transaction_id`, or 404 if there is none.
pub async fn retrieve_transaction_endpoint(
    State(state): State<RetrieveTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = get_transaction(transaction_id, &connection)?;

    Ok(Json(transaction))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Category, Transaction, TransactionType, create_transaction,
            retrieve_endpoint::{RetrieveTransactionState, retrieve_transaction_endpoint},
        },
    };

    fn get_test_state() -> RetrieveTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        RetrieveTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn retrieves_transaction() {
        let state = get_test_state();
        let want = create_transaction(
            Transaction::build(
                "Alice",
                TransactionType::Income,
                "1500".parse().unwrap(),
                date!(2025 - 07 - 01),
                Category::Salary,
            )
            .description("July pay"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let got = retrieve_transaction_endpoint(State(state), Path(want.id))
            .await
            .unwrap();

        assert_eq!(got.0, want);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = get_test_state();

        let result = retrieve_transaction_endpoint(State(state), Path(404)).await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
