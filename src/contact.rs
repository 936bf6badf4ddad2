//! Contact form validation and the simulated submission.
//!
//! There is no backend: [`submit`] validates, waits the configured delay and
//! reports success, or a send failure when the config asks for one. Validation stops at the first failing field, in form order.

use crate::config::ContactConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a subject")]
    MissingSubject,
    #[error("Please enter your message")]
    MissingMessage,
    #[error("Sorry, there was an error sending your message. Please try again.")]
    SubmitFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }
        if !is_valid_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        if self.subject.trim().is_empty() {
            return Err(ContactError::MissingSubject);
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingMessage);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub recipient: String,
    pub subject: String,
    pub message: &'static str,
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

/// First run of ten ASCII digits, grouped 3-3-4.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{3})([0-9]{3})([0-9]{4})").expect("phone regex should compile")
});

/// `local@domain.tld`: no whitespace, a single `@`, a dot in the domain part.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Rewrite the first ten-digit run as `(ddd) ddd-dddd`, leaving the rest of
/// the input in place.
pub fn format_phone_number(phone: &str) -> String {
    PHONE_PATTERN.replace(phone, "($1) $2-$3").into_owned()
}

/// Validate and "send" the form after the configured delay.
///
/// With `simulate_failure` set the send step fails after the delay, the way a
/// dropped connection would.
pub fn submit(form: &ContactForm, config: &ContactConfig) -> Result<Receipt, ContactError> {
    form.validate()?;
    let delay = Duration::from_millis(config.submit_delay_ms);
    tracing::debug!(?delay, subject = %form.subject.trim(), "simulating contact submission");
    std::thread::sleep(delay);
    if config.simulate_failure {
        tracing::warn!("simulated contact submission failure");
        return Err(ContactError::SubmitFailed);
    }
    Ok(Receipt {
        recipient: form.email.trim().to_string(),
        subject: form.subject.trim().to_string(),
        message: SUCCESS_MESSAGE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Asha".to_string(),
            email: "asha@example.edu".to_string(),
            subject: "Reunion".to_string(),
            message: "Count me in.".to_string(),
        }
    }

    #[test]
    fn complete_form_is_valid() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn first_failing_field_is_reported() {
        let form = ContactForm {
            name: " ".to_string(),
            email: "bad".to_string(),
            ..ContactForm::default()
        };
        assert_eq!(form.validate(), Err(ContactError::MissingName));

        let form = ContactForm {
            email: "bad".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ContactError::InvalidEmail));

        let form = ContactForm {
            subject: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ContactError::MissingSubject));

        let form = ContactForm {
            message: "\n".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ContactError::MissingMessage));
    }

    #[test]
    fn error_messages_match_page_copy() {
        assert_eq!(
            ContactError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn email_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@com."));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn phone_formatting() {
        assert_eq!(format_phone_number("9799546261"), "(979) 954-6261");
        assert_eq!(format_phone_number("12345"), "12345");
    }

    #[test]
    fn phone_formatting_rewrites_first_digit_run_only() {
        assert_eq!(format_phone_number("09799546261"), "(097) 995-46261");
        assert_eq!(
            format_phone_number("tel 9799546261 or 1234567890"),
            "tel (979) 954-6261 or 1234567890"
        );
        assert_eq!(format_phone_number("979-954-6261"), "979-954-6261");
    }

    fn instant() -> ContactConfig {
        ContactConfig {
            submit_delay_ms: 0,
            ..ContactConfig::default()
        }
    }

    #[test]
    fn submit_returns_receipt() {
        let receipt = submit(&filled(), &instant()).unwrap();
        assert_eq!(receipt.recipient, "asha@example.edu");
        assert_eq!(receipt.message, SUCCESS_MESSAGE);
    }

    #[test]
    fn submit_rejects_invalid_form() {
        let form = ContactForm::default();
        assert_eq!(submit(&form, &instant()), Err(ContactError::MissingName));
    }

    #[test]
    fn simulated_failure_reports_send_error() {
        let config = ContactConfig {
            simulate_failure: true,
            ..instant()
        };
        let err = submit(&filled(), &config).unwrap_err();
        assert_eq!(err, ContactError::SubmitFailed);
        assert_eq!(
            err.to_string(),
            "Sorry, there was an error sending your message. Please try again."
        );
        // Validation still runs first.
        assert_eq!(
            submit(&ContactForm::default(), &config),
            Err(ContactError::MissingName)
        );
    }
}
