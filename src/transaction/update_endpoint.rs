//! Defines the JSON endpoints for replacing and partially updating a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{
        Transaction, TransactionId,
        core::{get_transaction, update_transaction},
        payload::{Completion, TransactionPayload},
    },
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for PUT requests.
///
/// Every required field must be in the body. A missing description keeps
/// its current value.
pub async fn replace_transaction_endpoint(
    State(state): State<UpdateTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    body: Bytes,
) -> Result<Json<Transaction>, Error> {
    update(&state, transaction_id, &body, UpdateKind::Replace)
}

/// A route handler for PATCH requests. Fields missing from the body keep their current values.
pub async fn patch_transaction_endpoint(
    State(state): State<UpdateTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    body: Bytes,
) -> Result<Json<Transaction>, Error> {
    update(&state, transaction_id, &body, UpdateKind::Patch)
}

enum UpdateKind {
    Replace,
    Patch,
}

fn update(
    state: &UpdateTransactionState,
    transaction_id: TransactionId,
    body: &[u8],
    kind: UpdateKind,
) -> Result<Json<Transaction>, Error> {
    let payload = TransactionPayload::from_json(body)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    // Look the transaction up first so that a missing ID is reported as 404
    // even when the body is also invalid.
    let current = get_transaction(transaction_id, &connection)?;
    let completion = match kind {
        UpdateKind::Replace => Completion::Replace(&current),
        UpdateKind::Patch => Completion::Patch(&current),
    };
    let builder = payload.complete(completion)?;

    let transaction = update_transaction(transaction_id, builder, &connection).inspect_err(
        |error| tracing::error!("could not update transaction {transaction_id}: {error}"),
    )?;

    Ok(Json(transaction))
}
