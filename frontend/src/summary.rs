//! Totals, filtering and chart data derived from the transaction list.
//!
//! Everything here is recomputed from the full list on each render.

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::model::{RecordId, Transaction, TransactionType};

/// Income, expense and balance totals for a list of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl Totals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Totals::default(), |mut totals, transaction| {
                let total = match transaction.kind {
                    TransactionType::Income => &mut totals.income,
                    TransactionType::Expense => &mut totals.expenses,
                };
                *total = add_saturating(*total, transaction);
                totals
            })
    }

    /// Total income minus total expenses.
    pub fn balance(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }
}

/// Totals stop at `Decimal::MAX` instead of overflowing.
fn add_saturating(total: Decimal, transaction: &Transaction) -> Decimal {
    total.checked_add(transaction.amount).unwrap_or_else(|| {
        tracing::warn!(
            "Total overflowed at transaction {}, capping at the largest amount",
            transaction.id
        );
        Decimal::MAX
    })
}

/// The filter buttons above the transaction table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterType {
    #[default]
    All,
    Income,
    Expense,
}

impl FilterType {
    pub const ALL: [FilterType; 3] = [FilterType::All, FilterType::Income, FilterType::Expense];

    pub fn label(&self) -> &'static str {
        match self {
            FilterType::All => "All",
            FilterType::Income => "Income",
            FilterType::Expense => "Expense",
        }
    }

    /// Button class when this filter is the active one.
    pub fn active_class(&self) -> &'static str {
        match self {
            FilterType::All => "btn-primary",
            FilterType::Income => "btn-success",
            FilterType::Expense => "btn-danger",
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Income | FilterType::Expense => transaction
                .kind
                .as_str()
                .eq_ignore_ascii_case(self.label()),
        }
    }
}

/// The transactions matching `filter`, newest first.
///
/// Transactions on the same date keep the order they arrived in.
pub fn filter_and_sort(transactions: &[Transaction], filter: FilterType) -> Vec<Transaction> {
    let mut selected: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect();

    // stable sort
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}

/// A copy of `transactions` without the transaction with the id `id`.
pub fn remove_transaction(transactions: &[Transaction], id: &RecordId) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| &transaction.id != id)
        .cloned()
        .collect()
}

/// One bar in the income/expenses chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: Decimal,
    pub color: &'static str,
    /// Height as a percentage of the tallest bar, in `0..=100`.
    pub percent: u32,
}

/// Income and expense bars scaled so the larger total fills the chart.
pub fn bar_chart(totals: &Totals) -> [Bar; 2] {
    let max = totals.income.max(totals.expenses);
    let percent = |value: Decimal| -> u32 {
        if max.is_zero() {
            return 0;
        }

        // Divide first: `value <= max`, so the ratio can't overflow when scaled.
        (value / max)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.round().to_u32())
            .unwrap_or(0)
    };

    [
        Bar {
            label: "Income",
            value: totals.income,
            color: "green",
            percent: percent(totals.income),
        },
        Bar {
            label: "Expenses",
            value: totals.expenses,
            color: "red",
            percent: percent(totals.expenses),
        },
    ]
}
