//! Form models for the mocked login, signup and contact flows
//!
//! Every input is a named field; nothing is looked up by position.

use crate::models::password::SecretString;

/// Login form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

/// Signup form
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub agree_terms: bool,
}

/// Contact form
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Collect the labels of blank fields, in order
pub(crate) fn blank_fields<'a>(fields: &[(&'static str, &'a str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields() {
        let blank = blank_fields(&[("Name", "Ada"), ("Email", "  "), ("Subject", "")]);
        assert_eq!(blank, vec!["Email", "Subject"]);
    }
}
