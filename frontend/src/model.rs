//! Transactions, categories and their wire formats.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EXPENSE_CATEGORIES: [&str; 9] = [
    "Food",
    "Transportation",
    "Utilities",
    "Housing",
    "Insurances",
    "Medical",
    "Debt",
    "Entertainment",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 5] = ["Salary", "Freelance", "Investments", "Gifts", "Other"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Capitalised name for display, e.g. "Income".
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// The categories a transaction of this type may use.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => &INCOME_CATEGORIES,
            TransactionType::Expense => &EXPENSE_CATEGORIES,
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("income") {
            Ok(TransactionType::Income)
        } else if s.eq_ignore_ascii_case("expense") {
            Ok(TransactionType::Expense)
        } else {
            Err(format!("unknown transaction type \"{s}\""))
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An identifier assigned by the server.
///
/// The API is not consistent about sending ids as numbers or strings, so both
/// are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(id) => Ok(RecordId(id.to_string())),
            Repr::Text(id) => Ok(RecordId(id)),
        }
    }
}

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: RecordId,
    pub user_id: Option<RecordId>,
    pub category: String,
    /// Always non-negative; the direction comes from `kind`.
    pub amount: Decimal,
    pub kind: TransactionType,
    pub date: NaiveDate,
}

/// A transaction as the server sends it, before its fields are checked.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: RecordId,
    #[serde(default)]
    pub user_id: Option<RecordId>,
    pub category_name: String,
    pub transaction_amount: Value,
    pub transaction_type: String,
    pub transaction_date: String,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = String;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let amount = parse_wire_amount(&record.transaction_amount)?;
        let kind = record.transaction_type.parse()?;
        let date = parse_wire_date(&record.transaction_date)?;

        Ok(Transaction {
            id: record.transaction_id,
            user_id: record.user_id,
            category: record.category_name,
            amount,
            kind,
            date,
        })
    }
}

fn parse_wire_amount(value: &Value) -> Result<Decimal, String> {
    let amount = match value {
        Value::String(text) => Decimal::from_str(text.trim()),
        Value::Number(number) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string())),
        other => return Err(format!("amount {other} is not a number")),
    }
    .map_err(|error| format!("amount {value} is not a decimal: {error}"))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!("amount {amount} is negative"));
    }

    Ok(amount)
}

/// Accepts plain dates and full RFC 3339 timestamps, keeping only the calendar date.
fn parse_wire_date(text: &str) -> Result<NaiveDate, String> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Ok(date_time.date_naive());
    }

    text.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| format!("\"{text}\" is not a date"))
}

/// Decode a list of server records, dropping any that are malformed.
pub fn transactions_from_records(records: Vec<TransactionRecord>) -> Vec<Transaction> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.transaction_id.clone();
            match Transaction::try_from(record) {
                Ok(transaction) => Some(transaction),
                Err(reason) => {
                    tracing::warn!("Dropping transaction {id}: {reason}");
                    None
                }
            }
        })
        .collect()
}

/// The body of `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: RecordId,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    #[serde(with = "wire_date")]
    pub transaction_date: NaiveDate,
}

mod wire_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod model_tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{
        NewTransaction, RecordId, Transaction, TransactionRecord, TransactionType,
        transactions_from_records,
    };

    fn record(value: serde_json::Value) -> TransactionRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_string_amount_and_timestamp() {
        let record = record(json!({
            "transaction_id": 7,
            "user_id": "3",
            "category_name": "Food",
            "transaction_amount": "12.50",
            "transaction_type": "expense",
            "transaction_date": "2024-01-02T00:00:00.000Z",
        }));

        let transaction = Transaction::try_from(record).unwrap();

        assert_eq!(transaction.id, RecordId::new("7"));
        assert_eq!(transaction.user_id, Some(RecordId::new("3")));
        assert_eq!(transaction.amount, Decimal::new(1250, 2));
        assert_eq!(transaction.kind, TransactionType::Expense);
        assert_eq!(
            transaction.date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn decodes_numeric_amount_and_plain_date() {
        let record = record(json!({
            "transaction_id": "a1",
            "category_name": "Salary",
            "transaction_amount": 100,
            "transaction_type": "Income",
            "transaction_date": "2024-03-15",
        }));

        let transaction = Transaction::try_from(record).unwrap();

        assert_eq!(transaction.amount, Decimal::from(100));
        assert_eq!(transaction.kind, TransactionType::Income);
        assert_eq!(transaction.user_id, None);
    }

    #[test]
    fn drops_records_with_malformed_amounts() {
        let records = vec![
            record(json!({
                "transaction_id": 1,
                "category_name": "Food",
                "transaction_amount": "abc",
                "transaction_type": "expense",
                "transaction_date": "2024-01-01",
            })),
            record(json!({
                "transaction_id": 2,
                "category_name": "Food",
                "transaction_amount": "-5",
                "transaction_type": "expense",
                "transaction_date": "2024-01-01",
            })),
            record(json!({
                "transaction_id": 3,
                "category_name": "Gifts",
                "transaction_amount": "5",
                "transaction_type": "income",
                "transaction_date": "2024-01-01",
            })),
        ];

        let transactions = transactions_from_records(records);

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, RecordId::new("3"));
    }

    #[test]
    fn drops_records_with_unknown_type() {
        let records = vec![record(json!({
            "transaction_id": 1,
            "category_name": "Food",
            "transaction_amount": "5",
            "transaction_type": "transfer",
            "transaction_date": "2024-01-01",
        }))];

        assert!(transactions_from_records(records).is_empty());
    }

    #[test]
    fn new_transaction_body_matches_api() {
        let body = NewTransaction {
            user_id: RecordId::new("42"),
            category: "Salary".to_string(),
            amount: Decimal::new(123450, 2),
            transaction_type: TransactionType::Income,
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
        };

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "userId": "42",
                "category": "Salary",
                "amount": 1234.5,
                "transactionType": "income",
                "transactionDate": "2024-05-06",
            })
        );
    }

    #[test]
    fn category_sets_depend_on_type() {
        assert!(TransactionType::Expense.categories().contains(&"Medical"));
        assert!(!TransactionType::Income.categories().contains(&"Medical"));
        assert!(TransactionType::Income.categories().contains(&"Salary"));
    }
}
