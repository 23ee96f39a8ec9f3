//! Error types shared by the forms, the API client and session storage.

/// Shown whenever a request fails for a reason the user cannot act on.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// A form input that failed client-side validation.
///
/// No request is sent while any of these are present.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    EmptyName,

    #[error("Please enter your email.")]
    EmptyEmail,

    #[error("\"{0}\" is not a valid email address.")]
    InvalidEmail(String),

    #[error("Please enter your password.")]
    EmptyPassword,

    #[error("Password must be at least {0} characters.")]
    PasswordTooShort(usize),

    /// The password is too easy to guess. Holds the strength checker's advice.
    #[error("Password is too weak. {0}")]
    TooWeak(String),

    #[error("Please select a category.")]
    MissingCategory,

    #[error("\"{0}\" is not a {1} category.")]
    UnknownCategory(String, &'static str),

    #[error("Please enter an amount.")]
    EmptyAmount,

    #[error("\"{0}\" is not a valid amount.")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero.")]
    ZeroAmount,
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The server answered with a non-success status.
    ///
    /// `message` is the `message` field of the response body, if it had one.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be read or had an unexpected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Browser storage is missing or refused the write.
    #[error("browser storage error: {0}")]
    Storage(String),

    #[error("no user is logged in")]
    NotLoggedIn,
}

impl Error {
    /// Text to show the user for this error.
    ///
    /// `rejected_fallback` is used when the server rejected the request without
    /// saying why.
    pub fn user_message(&self, rejected_fallback: &str) -> String {
        match self {
            Error::Invalid(error) => error.to_string(),
            Error::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Error::Rejected { .. } => rejected_fallback.to_string(),
            Error::NotLoggedIn => "Please log in to continue.".to_string(),
            Error::Network(_) | Error::Decode(_) | Error::Storage(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<gloo_net::Error> for Error {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::SerdeError(error) => Error::Decode(error.to_string()),
            other => Error::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::{Error, GENERIC_ERROR_MESSAGE, ValidationError};

    #[test]
    fn rejected_uses_server_message() {
        let error = Error::Rejected {
            status: 401,
            message: Some("Invalid email or password".to_string()),
        };

        assert_eq!(error.user_message("Login failed"), "Invalid email or password");
    }

    #[test]
    fn rejected_without_message_uses_fallback() {
        let error = Error::Rejected {
            status: 500,
            message: None,
        };

        assert_eq!(error.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn rejected_with_blank_message_uses_fallback() {
        let error = Error::Rejected {
            status: 400,
            message: Some("  ".to_string()),
        };

        assert_eq!(error.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn transport_failures_use_generic_message() {
        let network = Error::Network("connection refused".to_string());
        let decode = Error::Decode("expected value".to_string());

        assert_eq!(network.user_message("unused"), GENERIC_ERROR_MESSAGE);
        assert_eq!(decode.user_message("unused"), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn validation_errors_show_their_own_text() {
        let error = Error::from(ValidationError::EmptyPassword);

        assert_eq!(error.user_message("unused"), "Please enter your password.");
    }
}
