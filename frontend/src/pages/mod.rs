pub mod auth;
pub mod overview;
pub mod transactions;

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    api,
    config::Config,
    model::{RecordId, Transaction},
    summary::remove_transaction,
};

/// The transactions shown on a page.
///
/// Changes go through [`TransactionListAction`] so they always apply to the
/// latest list, even when dispatched from a task started on an older render.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct TransactionList {
    pub transactions: Vec<Transaction>,
}

pub(crate) enum TransactionListAction {
    /// A fresh copy from the server.
    Replace(Vec<Transaction>),
    /// The server deleted this transaction.
    Remove(RecordId),
}

impl Reducible for TransactionList {
    type Action = TransactionListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let transactions = match action {
            TransactionListAction::Replace(transactions) => transactions,
            TransactionListAction::Remove(id) => remove_transaction(&self.transactions, &id),
        };

        Rc::new(TransactionList { transactions })
    }
}

/// Replace the list with a fresh copy from the server.
///
/// On failure the current list stays on screen and `error` is set.
pub(crate) fn refresh_transactions(
    config: Config,
    user_id: RecordId,
    transactions: UseReducerHandle<TransactionList>,
    loaded: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
) {
    spawn_local(async move {
        match api::list_transactions(&config, &user_id).await {
            Ok(list) => {
                transactions.dispatch(TransactionListAction::Replace(list));
                error.set(None);
            }
            Err(fetch_error) => {
                tracing::error!("Error fetching transactions: {fetch_error}");
                error.set(Some(
                    fetch_error.user_message("Could not load your transactions."),
                ));
            }
        }
        loaded.set(true);
    });
}
