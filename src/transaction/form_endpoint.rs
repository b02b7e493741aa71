//! Defines the endpoint for the new transaction form on the transactions page.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    transaction::{
        core::create_transaction,
        payload::{Completion, TransactionPayload},
    },
};

/// The state needed to submit the new transaction form.
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the new transaction form, redirects to the transactions view on success.
///
/// Invalid fields are reported with an HTML alert and nothing is saved.
pub async fn submit_transaction_form(
    State(state): State<TransactionFormState>,
    Form(form): Form<TransactionPayload>,
) -> Response {
    let builder = match form.complete(Completion::Create) {
        Ok(builder) => builder,
        Err(errors) => {
            tracing::debug!("rejected new transaction form: {errors}");
            return Error::Validation(errors).into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_transaction(builder, &connection) {
        tracing::error!("could not create transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
