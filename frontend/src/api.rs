//! Calls to the SpendWisely REST API.
//!
//! One function per endpoint. Each issues exactly one request and maps the
//! outcome onto [Error].

use gloo_net::http::{Request, Response};
use serde::Deserialize;

use crate::{
    config::Config,
    error::Error,
    model::{NewTransaction, RecordId, Transaction, TransactionRecord, transactions_from_records},
    validation::{LoginRequest, RegisterRequest},
};

/// The user returned by a successful log in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user_id: RecordId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the `message` field from an error response body.
fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

async fn rejected(response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = message_from_body(&body);

    tracing::warn!(
        "Request to {} rejected with status {status}: {message:?}",
        response.url()
    );

    Error::Rejected { status, message }
}

pub async fn login(config: &Config, request: &LoginRequest) -> Result<LoginResponse, Error> {
    let url = config.endpoint("login");
    tracing::info!("Logging in as {}", request.email);

    let response = Request::post(&url).json(request)?.send().await?;

    // The login endpoint only ever answers 200 on success.
    if response.status() != 200 {
        return Err(rejected(response).await);
    }

    Ok(response.json::<LoginResponse>().await?)
}

pub async fn register(config: &Config, request: &RegisterRequest) -> Result<(), Error> {
    let url = config.endpoint("register");
    tracing::info!("Registering {}", request.email);

    let response = Request::post(&url).json(request)?.send().await?;

    if !response.ok() {
        return Err(rejected(response).await);
    }

    Ok(())
}

/// Fetch every transaction belonging to `user_id`.
///
/// Records the client cannot make sense of are skipped.
pub async fn list_transactions(
    config: &Config,
    user_id: &RecordId,
) -> Result<Vec<Transaction>, Error> {
    let url = config.endpoint("transactions");
    tracing::debug!("Fetching transactions for user {user_id}");

    let response = Request::get(&url)
        .query([("userId", user_id.as_str())])
        .send()
        .await?;

    if !response.ok() {
        return Err(rejected(response).await);
    }

    let records = response.json::<Vec<TransactionRecord>>().await?;
    let transactions = transactions_from_records(records);
    tracing::debug!("Fetched {} transactions", transactions.len());

    Ok(transactions)
}

pub async fn create_transaction(config: &Config, body: &NewTransaction) -> Result<(), Error> {
    let url = config.endpoint("transactions");
    tracing::info!(
        "Adding {} {} of {} in {}",
        body.transaction_type.as_str(),
        body.transaction_date,
        body.amount,
        body.category
    );

    let response = Request::post(&url).json(body)?.send().await?;

    if !response.ok() {
        return Err(rejected(response).await);
    }

    Ok(())
}

pub async fn delete_transaction(config: &Config, id: &RecordId) -> Result<(), Error> {
    let url = config.endpoint(&format!("transactions/{id}"));
    tracing::info!("Deleting transaction {id}");

    let response = Request::delete(&url).send().await?;

    if !response.ok() {
        return Err(rejected(response).await);
    }

    Ok(())
}
