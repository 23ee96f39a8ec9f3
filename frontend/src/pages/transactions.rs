//! The main tracker page: totals, the add form and the transaction table.

use chrono::{Datelike, Local};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::{TransactionList, TransactionListAction, refresh_transactions};
use crate::{
    Page, api,
    config::Config,
    format::{format_currency, format_date, title_case},
    model::{NewTransaction, RecordId, Transaction, TransactionType},
    session::{BrowserStorage, Session},
    summary::{FilterType, Totals, filter_and_sort},
    validation::{can_submit_transaction, sanitize_amount_input, validate_transaction},
    widgets::{Alert, icon_plus, icon_trash, page_shell},
};

#[derive(Properties, PartialEq)]
struct UserInfoProps {
    name: String,
    totals: Totals,
}

#[function_component(UserInfo)]
fn user_info(props: &UserInfoProps) -> Html {
    let balance = props.totals.balance();
    let balance_class = if balance.is_sign_positive() && !balance.is_zero() {
        "text-green-700 text-3xl font-bold"
    } else if balance.is_sign_negative() && !balance.is_zero() {
        "text-red-500 text-3xl font-bold"
    } else {
        "text-black text-3xl font-bold"
    };

    html! {
        <div class="text-center py-6 space-y-2">
            <h1 class="text-4xl pb-3">{ format!("Hello, {}!", title_case(&props.name)) }</h1>
            <h2 class={balance_class}>{ format!("Total Balance: {}", format_currency(balance)) }</h2>
            <h4 class="text-2xl">{ format!("Total Income: {}", format_currency(props.totals.income)) }</h4>
            <h4 class="text-2xl">{ format!("Total Expenses: -{}", format_currency(props.totals.expenses)) }</h4>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TransactionFormProps {
    user_id: RecordId,
    /// Called after the server accepted a new transaction.
    on_added: Callback<()>,
}

#[function_component(TransactionForm)]
fn transaction_form(props: &TransactionFormProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let kind = use_state(|| TransactionType::Expense);
    let category = use_state(String::new);
    let amount = use_state(String::new);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let can_submit = can_submit_transaction(*kind, &category, &amount) && !*saving;

    let on_kind_change = {
        let kind = kind.clone();
        let category = category.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(selected) = select.value().parse::<TransactionType>() {
                kind.set(selected);
                category.set(String::new());
            }
        })
    };

    let on_category_change = {
        let category = category.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            category.set(select.value());
        })
    };

    let on_amount_input = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let sanitized = sanitize_amount_input(&input.value());
            // Write back so rejected characters disappear from the field.
            input.set_value(&sanitized);
            amount.set(sanitized);
        })
    };

    let on_submit = {
        let kind = kind.clone();
        let category = category.clone();
        let amount = amount.clone();
        let error = error.clone();
        let saving = saving.clone();
        let user_id = props.user_id.clone();
        let on_added = props.on_added.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *saving {
                return;
            }

            let input = match validate_transaction(*kind, &category, &amount) {
                Ok(input) => input,
                Err(validation_error) => {
                    error.set(Some(validation_error.to_string()));
                    return;
                }
            };

            let body = NewTransaction {
                user_id: user_id.clone(),
                category: input.category,
                amount: input.amount,
                transaction_type: input.kind,
                transaction_date: Local::now().date_naive(),
            };

            saving.set(true);
            error.set(None);

            let config = config.clone();
            let category = category.clone();
            let amount = amount.clone();
            let error = error.clone();
            let saving = saving.clone();
            let on_added = on_added.clone();
            spawn_local(async move {
                match api::create_transaction(&config, &body).await {
                    Ok(()) => {
                        category.set(String::new());
                        amount.set(String::new());
                        on_added.emit(());
                    }
                    Err(create_error) => {
                        tracing::error!("Error adding transaction: {create_error}");
                        error.set(Some(
                            create_error.user_message("Could not save the transaction."),
                        ));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let select_class = "w-full border rounded-lg px-3 py-2 outline-none focus:ring-2 focus:ring-blue-500";

    html! {
        <form class="max-w-xl mx-auto space-y-3" onsubmit={on_submit}>
            <label class="block">{"Transaction type:"}</label>
            <select class={select_class} onchange={on_kind_change}>
                { for [TransactionType::Expense, TransactionType::Income].iter().map(|option| html! {
                    <option value={option.label()} selected={*option == *kind}>{ option.label() }</option>
                }) }
            </select>

            <label class="block">{"Transaction category:"}</label>
            <select class={select_class} onchange={on_category_change}>
                <option value="" selected={category.is_empty()}>{"Select a category"}</option>
                { for kind.categories().iter().map(|name| html! {
                    <option value={*name} selected={**name == **category}>{ *name }</option>
                }) }
            </select>

            <label class="block">{"Transaction amount:"}</label>
            <input type="text" class={select_class} placeholder="Enter amount" value={(*amount).clone()} oninput={on_amount_input} />

            <Alert message={(*error).clone()} on_dismiss={on_dismiss} />

            <div class="flex justify-center pt-2">
                <button type="submit" disabled={!can_submit}
                    class="flex items-center gap-2 bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded disabled:opacity-50 disabled:cursor-not-allowed">
                    { icon_plus() }
                    { if *saving { "Saving..." } else { "Add transaction" } }
                </button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct TransactionsTableProps {
    transactions: Vec<Transaction>,
    filter: FilterType,
    on_filter: Callback<FilterType>,
    on_delete: Callback<RecordId>,
    /// Delete buttons are disabled while a delete is in flight.
    deleting: bool,
}

#[function_component(TransactionsTable)]
fn transactions_table(props: &TransactionsTableProps) -> Html {
    let rows = filter_and_sort(&props.transactions, props.filter);
    let year = Local::now().year();

    html! {
        <div>
            <h4 class="text-2xl text-center pb-3">{ format!("Transaction history for {year}:") }</h4>
            <div class="flex justify-center gap-2 pb-4">
                { for FilterType::ALL.iter().map(|filter| {
                    let filter = *filter;
                    let on_filter = props.on_filter.clone();
                    let class = if filter == props.filter {
                        format!("btn py-1 px-3 {}", filter.active_class())
                    } else {
                        "btn py-1 px-3 btn-light".to_string()
                    };
                    html! {
                        <button class={class} onclick={Callback::from(move |_| on_filter.emit(filter))}>
                            { filter.label() }
                        </button>
                    }
                }) }
            </div>
            <table class="table-auto w-full text-center">
                <thead>
                    <tr>
                        <th>{"Date"}</th>
                        <th>{"Amount"}</th>
                        <th>{"Category"}</th>
                        <th>{"Type"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    if rows.is_empty() {
                        <tr>
                            <td colspan="5" class="text-center py-4"><h4>{"No transactions found."}</h4></td>
                        </tr>
                    } else {
                        { for rows.iter().map(|transaction| {
                            let (amount_class, sign) = match transaction.kind {
                                TransactionType::Expense => ("py-2 text-red-500", "-"),
                                TransactionType::Income => ("py-2 text-green-700", ""),
                            };
                            let id = transaction.id.clone();
                            let on_delete = props.on_delete.clone();

                            html! {
                                <tr key={transaction.id.as_str().to_string()}>
                                    <td class="py-2">{ format_date(transaction.date) }</td>
                                    <td class={amount_class}>{ format!("{sign}{}", format_currency(transaction.amount)) }</td>
                                    <td class="py-2">{ transaction.category.clone() }</td>
                                    <td class="py-2">{ transaction.kind.label() }</td>
                                    <td class="py-2">
                                        <button class="btn btn-danger btn-sm" disabled={props.deleting}
                                            aria-label="Delete" title="Delete"
                                            onclick={Callback::from(move |_| on_delete.emit(id.clone()))}>
                                            { icon_trash() }
                                        </button>
                                    </td>
                                </tr>
                            }
                        }) }
                    }
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let session = use_state(|| Session::require(&BrowserStorage).ok());
    let transactions = use_reducer(TransactionList::default);
    let loaded = use_state(|| false);
    let error = use_state(|| None::<String>);
    let filter = use_state(FilterType::default);
    let deleting = use_state(|| false);

    {
        let config = config.clone();
        let session = (*session).clone();
        let transactions = transactions.clone();
        let loaded = loaded.clone();
        let error = error.clone();
        let on_navigate = props.on_navigate.clone();

        use_effect_with_deps(
            move |_| {
                match session {
                    Some(session) => {
                        refresh_transactions(config, session.user_id, transactions, loaded, error)
                    }
                    None => {
                        tracing::info!("No session, redirecting to the login page");
                        on_navigate.emit(Page::Login);
                    }
                }
                || ()
            },
            (),
        );
    }

    let Some(current) = (*session).clone() else {
        return html! {};
    };

    let on_added = {
        let config = config.clone();
        let user_id = current.user_id.clone();
        let transactions = transactions.clone();
        let loaded = loaded.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            refresh_transactions(
                config.clone(),
                user_id.clone(),
                transactions.clone(),
                loaded.clone(),
                error.clone(),
            )
        })
    };

    let on_delete = {
        let config = config.clone();
        let transactions = transactions.clone();
        let error = error.clone();
        let deleting = deleting.clone();
        Callback::from(move |id: RecordId| {
            if *deleting {
                return;
            }
            deleting.set(true);

            let config = config.clone();
            let transactions = transactions.clone();
            let error = error.clone();
            let deleting = deleting.clone();
            spawn_local(async move {
                match api::delete_transaction(&config, &id).await {
                    Ok(()) => transactions.dispatch(TransactionListAction::Remove(id)),
                    Err(delete_error) => {
                        tracing::error!("Error deleting transaction {id}: {delete_error}");
                        error.set(Some(
                            delete_error.user_message("Could not delete the transaction."),
                        ));
                    }
                }
                deleting.set(false);
            });
        })
    };

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |selected: FilterType| filter.set(selected))
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let totals = Totals::from_transactions(&transactions.transactions);

    html! {
        { page_shell(
            "Transactions",
            html! {},
            html! {
                <>
                    <UserInfo name={current.name.clone()} totals={totals} />
                    <TransactionForm user_id={current.user_id.clone()} on_added={on_added} />
                    <Alert message={(*error).clone()} on_dismiss={on_dismiss} />
                    if *loaded {
                        <TransactionsTable
                            transactions={transactions.transactions.clone()}
                            filter={*filter}
                            on_filter={on_filter}
                            on_delete={on_delete}
                            deleting={*deleting}
                        />
                    } else {
                        <p class="text-center text-muted-foreground">{"Loading..."}</p>
                    }
                </>
            }
        ) }
    }
}
