//! Client-side checks run before any form is submitted.
//!
//! Each `validate_*` function returns the request body to send, or the first
//! problem found with the form.

use std::{fmt, str::FromStr};

use email_address::EmailAddress;
use rust_decimal::Decimal;
use serde::Serialize;
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::{
    error::ValidationError,
    format::format_with_commas,
    model::TransactionType,
};

/// Passwords shorter than this are rejected before the strength check runs.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Check that `raw_email` looks like an email address.
pub fn validate_email(raw_email: &str) -> Result<String, ValidationError> {
    let email = raw_email.trim();

    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }

    if !EmailAddress::is_valid(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }

    Ok(email.to_string())
}

/// Check that `raw_password` is long enough and hard to guess.
///
/// `user_inputs` are other values from the form (name, email) that the
/// password should not be built from.
pub fn validate_new_password(
    raw_password: &str,
    user_inputs: &[&str],
) -> Result<String, ValidationError> {
    if raw_password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }

    if raw_password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(ValidationError::PasswordTooShort(PASSWORD_MIN_LENGTH));
    }

    let analysis = zxcvbn(raw_password, user_inputs);

    match analysis.score() {
        Score::Three | Score::Four => Ok(raw_password.to_string()),
        _ => Err(ValidationError::TooWeak(
            analysis
                .feedback()
                .unwrap_or(&Feedback::default())
                .to_string(),
        )),
    }
}

/// The body of `POST /login`.
#[derive(Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let email = validate_email(email)?;

    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }

    Ok(LoginRequest {
        email,
        password: password.to_string(),
    })
}

/// The body of `POST /register`.
#[derive(Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let email = validate_email(email)?;
    let password = validate_new_password(password, &[name, email.as_str()])?;

    Ok(RegisterRequest {
        name: name.to_string(),
        email,
        password,
    })
}

/// Clean up the amount field as the user types.
///
/// Drops everything except digits and the first `.`, then groups the whole
/// part with commas: `"12a34.5.6"` becomes `"1,234.56"`.
pub fn sanitize_amount_input(raw: &str) -> String {
    let mut whole = String::new();
    let mut fraction: Option<String> = None;

    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            match fraction.as_mut() {
                Some(fraction) => fraction.push(ch),
                None => whole.push(ch),
            }
        } else if ch == '.' && fraction.is_none() {
            fraction = Some(String::new());
        }
    }

    let whole = format_with_commas(&whole);
    match fraction {
        Some(fraction) => format!("{whole}.{fraction}"),
        None => whole,
    }
}

/// Parse the (possibly comma-grouped) amount field.
///
/// Anything that is not a plain positive decimal is rejected.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let cleaned: String = raw.trim().chars().filter(|ch| *ch != ',').collect();

    if cleaned.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let amount = Decimal::from_str(&cleaned)
        .map_err(|_| ValidationError::InvalidAmount(raw.trim().to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::InvalidAmount(raw.trim().to_string()));
    }

    if amount.is_zero() {
        return Err(ValidationError::ZeroAmount);
    }

    Ok(amount)
}

/// A filled-in add-transaction form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub category: String,
    pub amount: Decimal,
    pub kind: TransactionType,
}

pub fn validate_transaction(
    kind: TransactionType,
    category: &str,
    amount: &str,
) -> Result<TransactionInput, ValidationError> {
    if category.is_empty() {
        return Err(ValidationError::MissingCategory);
    }

    if !kind.categories().contains(&category) {
        return Err(ValidationError::UnknownCategory(
            category.to_string(),
            kind.as_str(),
        ));
    }

    let amount = parse_amount(amount)?;

    Ok(TransactionInput {
        category: category.to_string(),
        amount,
        kind,
    })
}

/// Whether the login form may be submitted.
pub fn can_submit_login(email: &str, password: &str) -> bool {
    validate_login(email, password).is_ok()
}

/// Whether the registration form may be submitted.
pub fn can_submit_registration(name: &str, email: &str, password: &str) -> bool {
    validate_registration(name, email, password).is_ok()
}

/// Whether the forgot-password form may be submitted.
pub fn can_submit_password_reset(email: &str) -> bool {
    validate_email(email).is_ok()
}

/// Whether the add-transaction form may be submitted.
pub fn can_submit_transaction(kind: TransactionType, category: &str, amount: &str) -> bool {
    validate_transaction(kind, category, amount).is_ok()
}

#[cfg(test)]
mod email_tests {
    use super::validate_email;
    use crate::error::ValidationError;

    #[test]
    fn accepts_valid_address() {
        assert_eq!(validate_email(" foo@bar.baz "), Ok("foo@bar.baz".to_string()));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(validate_email("   "), Err(ValidationError::EmptyEmail));
    }

    #[test]
    fn rejects_missing_at_symbol() {
        assert!(matches!(
            validate_email("foobar.baz"),
            Err(ValidationError::InvalidEmail(_))
        ));
    }
}

#[cfg(test)]
mod login_tests {
    use super::validate_login;
    use crate::error::ValidationError;

    #[test]
    fn invalid_email_blocks_login() {
        let result = validate_login("not-an-email", "hunter2");

        assert!(matches!(result, Err(ValidationError::InvalidEmail(_))));
    }

    #[test]
    fn empty_password_blocks_login() {
        let result = validate_login("foo@bar.baz", "");

        assert_eq!(result, Err(ValidationError::EmptyPassword));
    }

    #[test]
    fn valid_form_builds_request() {
        let request = validate_login("foo@bar.baz", "hunter2").unwrap();

        assert_eq!(request.email, "foo@bar.baz");
        assert_eq!(request.password, "hunter2");
    }

    #[test]
    fn debug_output_hides_password() {
        let request = validate_login("foo@bar.baz", "hunter2").unwrap();

        let text = format!("{request:?}");

        assert!(!text.contains("hunter2"));
    }
}

#[cfg(test)]
mod registration_tests {
    use super::{validate_new_password, validate_registration};
    use crate::error::ValidationError;

    #[test]
    fn rejects_blank_name() {
        let result = validate_registration("  ", "foo@bar.baz", "T7#kq!vR2pLz9wMx");

        assert_eq!(result, Err(ValidationError::EmptyName));
    }

    #[test]
    fn rejects_short_password() {
        let result = validate_new_password("abc", &[]);

        assert_eq!(result, Err(ValidationError::PasswordTooShort(8)));
    }

    #[test]
    fn rejects_common_password() {
        let result = validate_new_password("password1", &[]);

        assert!(matches!(result, Err(ValidationError::TooWeak(_))));
    }

    #[test]
    fn rejects_password_built_from_email() {
        let result = validate_new_password("jane.doe@example.com", &["jane.doe@example.com"]);

        assert!(matches!(result, Err(ValidationError::TooWeak(_))));
    }

    #[test]
    fn accepts_strong_password() {
        let request =
            validate_registration(" Jane ", "jane@example.com", "T7#kq!vR2pLz9wMx")
                .unwrap();

        assert_eq!(request.name, "Jane");
        assert_eq!(request.email, "jane@example.com");
    }
}

#[cfg(test)]
mod amount_tests {
    use rust_decimal::Decimal;

    use super::{parse_amount, sanitize_amount_input, validate_transaction};
    use crate::{error::ValidationError, model::TransactionType};

    #[test]
    fn sanitize_strips_letters_and_groups_digits() {
        assert_eq!(sanitize_amount_input("12a34"), "1,234");
        assert_eq!(sanitize_amount_input("$1,000,000"), "1,000,000");
    }

    #[test]
    fn sanitize_keeps_only_the_first_period() {
        assert_eq!(sanitize_amount_input("12a34.5.6"), "1,234.56");
        assert_eq!(sanitize_amount_input("."), ".");
    }

    #[test]
    fn parse_strips_commas() {
        assert_eq!(parse_amount("1,234.56"), Ok(Decimal::new(123456, 2)));
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        assert_eq!(
            parse_amount("12abc"),
            Err(ValidationError::InvalidAmount("12abc".to_string()))
        );
        assert_eq!(
            parse_amount("1.2.3"),
            Err(ValidationError::InvalidAmount("1.2.3".to_string()))
        );
    }

    #[test]
    fn parse_rejects_empty_zero_and_negative() {
        assert_eq!(parse_amount(""), Err(ValidationError::EmptyAmount));
        assert_eq!(parse_amount("0.00"), Err(ValidationError::ZeroAmount));
        assert!(matches!(
            parse_amount("-5"),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn transaction_requires_category() {
        let result = validate_transaction(TransactionType::Expense, "", "10");

        assert_eq!(result, Err(ValidationError::MissingCategory));
    }

    #[test]
    fn transaction_category_must_match_type() {
        let result = validate_transaction(TransactionType::Income, "Food", "10");

        assert!(matches!(
            result,
            Err(ValidationError::UnknownCategory(_, "income"))
        ));
    }

    #[test]
    fn valid_transaction_form() {
        let input = validate_transaction(TransactionType::Expense, "Food", "1,050.25").unwrap();

        assert_eq!(input.category, "Food");
        assert_eq!(input.amount, Decimal::new(105025, 2));
        assert_eq!(input.kind, TransactionType::Expense);
    }
}

#[cfg(test)]
mod submit_tests {
    use super::{
        can_submit_login, can_submit_password_reset, can_submit_registration,
        can_submit_transaction,
    };
    use crate::model::TransactionType;

    #[test]
    fn login_needs_valid_email_and_a_password() {
        assert!(!can_submit_login("", ""));
        assert!(!can_submit_login("foo@bar.baz", ""));
        assert!(!can_submit_login("foo", "hunter2"));
        assert!(can_submit_login("foo@bar.baz", "hunter2"));
    }

    #[test]
    fn registration_needs_every_field_and_a_strong_password() {
        assert!(!can_submit_registration("", "jane@example.com", "T7#kq!vR2pLz9wMx"));
        assert!(!can_submit_registration("Jane", "jane", "T7#kq!vR2pLz9wMx"));
        assert!(!can_submit_registration("Jane", "jane@example.com", "password1"));
        assert!(can_submit_registration("Jane", "jane@example.com", "T7#kq!vR2pLz9wMx"));
    }

    #[test]
    fn password_reset_needs_a_valid_email() {
        assert!(!can_submit_password_reset(""));
        assert!(!can_submit_password_reset("jane"));
        assert!(can_submit_password_reset("jane@example.com"));
    }

    #[test]
    fn transaction_is_blocked_by_unusable_amounts() {
        let expense = TransactionType::Expense;

        assert!(!can_submit_transaction(expense, "Food", ""));
        assert!(!can_submit_transaction(expense, "Food", "."));
        assert!(!can_submit_transaction(expense, "Food", "0"));
        assert!(!can_submit_transaction(expense, "Food", "0.00"));
        assert!(can_submit_transaction(expense, "Food", "1,250.5"));
    }

    #[test]
    fn transaction_is_blocked_without_a_matching_category() {
        assert!(!can_submit_transaction(TransactionType::Expense, "", "10"));
        assert!(!can_submit_transaction(TransactionType::Income, "Food", "10"));
        assert!(can_submit_transaction(TransactionType::Income, "Salary", "10"));
    }
}
