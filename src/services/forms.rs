//! Mocked login, signup and contact submissions
//!
//! Nothing is sent anywhere. A submission is validated field by field, waits
//! out the configured latency and reports a success message. Each form has
//! its own in-flight guard, so a second submit while the first is pending
//! fails with [`FormError::Busy`].

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::settings::LatencySettings;
use crate::error::{FieldError, FormError, ValidationError};
use crate::models::forms::blank_fields;
use crate::models::{ContactForm, LoginForm, SignupForm};
use crate::services::task::{simulated_delay, CancelToken, InFlight};
use crate::services::validation::{validate, FieldKind};

pub const LOGIN_SUCCESS: &str = "Login successful! Welcome back.";
pub const SIGNUP_SUCCESS: &str = "Account created successfully! Welcome to PupilHelper.";
pub const CONTACT_SUCCESS: &str = "Thank you for your message! We will get back to you soon.";

/// Which form was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Login,
    Signup,
    Contact,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "Login"),
            Self::Signup => write!(f, "Sign Up"),
            Self::Contact => write!(f, "Contact"),
        }
    }
}

/// An accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submitted {
    pub kind: FormKind,
    pub message: &'static str,
}

/// Third-party login buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => write!(f, "Google"),
            Self::Facebook => write!(f, "Facebook"),
        }
    }
}

/// Informational text shown for a social login button
pub fn social_login_message(provider: SocialProvider) -> String {
    format!(
        "{} login would be implemented with OAuth integration.",
        provider
    )
}

/// Runs form submissions with per-form in-flight guards
#[derive(Debug, Clone)]
pub struct FormService {
    latency: LatencySettings,
    login: InFlight,
    signup: InFlight,
    contact: InFlight,
}

impl FormService {
    pub fn new(latency: LatencySettings) -> Self {
        Self {
            latency,
            login: InFlight::new(),
            signup: InFlight::new(),
            contact: InFlight::new(),
        }
    }

    pub async fn submit_login(
        &self,
        form: &LoginForm,
        token: &CancelToken,
    ) -> Result<Submitted, FormError> {
        let _guard = self.login.try_begin().ok_or(FormError::Busy)?;

        require(&[("Email", form.email.as_str()), ("Password", form.password.expose())])?;
        collect(vec![
            validate(FieldKind::Email, &form.email).err(),
            validate(FieldKind::Password, form.password.expose()).err(),
        ])?;

        simulated_delay(self.latency.auth(), token).await?;
        debug!(remember_me = form.remember_me, "login accepted");
        Ok(Submitted {
            kind: FormKind::Login,
            message: LOGIN_SUCCESS,
        })
    }

    pub async fn submit_signup(
        &self,
        form: &SignupForm,
        token: &CancelToken,
    ) -> Result<Submitted, FormError> {
        let _guard = self.signup.try_begin().ok_or(FormError::Busy)?;

        require(&[
            ("Name", form.name.as_str()),
            ("Email", form.email.as_str()),
            ("Password", form.password.expose()),
            ("Confirm password", form.confirm_password.expose()),
        ])?;
        if !form.agree_terms {
            return Err(FormError::TermsNotAccepted);
        }
        collect(vec![
            validate(FieldKind::Name, &form.name).err(),
            validate(FieldKind::Email, &form.email).err(),
            validate(FieldKind::Password, form.password.expose()).err(),
            validate(
                FieldKind::PasswordConfirmation {
                    primary: form.password.expose(),
                },
                form.confirm_password.expose(),
            )
            .err(),
        ])?;

        simulated_delay(self.latency.auth(), token).await?;
        debug!("signup accepted");
        Ok(Submitted {
            kind: FormKind::Signup,
            message: SIGNUP_SUCCESS,
        })
    }

    pub async fn submit_contact(
        &self,
        form: &ContactForm,
        token: &CancelToken,
    ) -> Result<Submitted, FormError> {
        let _guard = self.contact.try_begin().ok_or(FormError::Busy)?;

        require(&[
            ("Name", form.name.as_str()),
            ("Email", form.email.as_str()),
            ("Subject", form.subject.as_str()),
            ("Message", form.message.as_str()),
        ])?;
        collect(vec![validate(FieldKind::Email, &form.email).err()])?;

        if token.is_cancelled() {
            return Err(FormError::Cancelled);
        }
        debug!(subject = %form.subject.trim(), "contact message accepted");
        Ok(Submitted {
            kind: FormKind::Contact,
            message: CONTACT_SUCCESS,
        })
    }
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), FormError> {
    let missing = blank_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        debug!(?missing, "required fields missing");
        Err(FormError::MissingFields(missing))
    }
}

fn collect(results: Vec<Option<ValidationError>>) -> Result<(), FormError> {
    let errors: Vec<FieldError> = results.into_iter().flatten().map(FieldError::from).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        debug!(count = errors.len(), "form validation failed");
        Err(FormError::Invalid(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::task::cancel_pair;
    use std::sync::Arc;
    use std::time::Duration;

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    fn signup(name: &str, password: &str, confirm: &str, agree: bool) -> SignupForm {
        SignupForm {
            name: name.into(),
            email: "ada@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
            agree_terms: agree,
        }
    }

    fn instant() -> FormService {
        FormService::new(LatencySettings::disabled())
    }

    #[tokio::test]
    async fn test_login_success() {
        let submitted = instant()
            .submit_login(&login("ada@example.com", "secret1"), &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(submitted.kind, FormKind::Login);
        assert_eq!(submitted.message, LOGIN_SUCCESS);
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let err = instant()
            .submit_login(&login("", "  "), &CancelToken::never())
            .await
            .unwrap_err();
        assert_eq!(err, FormError::MissingFields(vec!["Email", "Password"]));
        assert_eq!(err.to_string(), "Please fill all required fields!");
    }

    #[tokio::test]
    async fn test_login_collects_field_errors() {
        let err = instant()
            .submit_login(&login("ada", "abc"), &CancelToken::never())
            .await
            .unwrap_err();
        let FormError::Invalid(errors) = err else {
            panic!("expected Invalid, got {err:?}");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["Email", "Password"]);
        assert_eq!(
            errors[1].error,
            ValidationError::TooShort {
                field: "Password",
                min: 6
            }
        );
    }

    #[tokio::test]
    async fn test_signup_terms_checked_before_fields() {
        let err = instant()
            .submit_signup(&signup("A", "abc", "xyz", false), &CancelToken::never())
            .await
            .unwrap_err();
        assert_eq!(err, FormError::TermsNotAccepted);
    }

    #[tokio::test]
    async fn test_signup_mismatch() {
        let err = instant()
            .submit_signup(&signup("Ada", "secret1", "secret2", true), &CancelToken::never())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FormError::Invalid(vec![FieldError::from(ValidationError::Mismatch {
                field: "Confirm password"
            })])
        );
    }

    #[tokio::test]
    async fn test_signup_success() {
        let submitted = instant()
            .submit_signup(&signup("Ada", "secret1", "secret1", true), &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(submitted.message, SIGNUP_SUCCESS);
    }

    #[tokio::test]
    async fn test_contact() {
        let service = instant();
        let mut form = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: String::new(),
        };
        assert_eq!(
            service.submit_contact(&form, &CancelToken::never()).await,
            Err(FormError::MissingFields(vec!["Message"]))
        );

        form.message = "Hello there".into();
        let submitted = service.submit_contact(&form, &CancelToken::never()).await.unwrap();
        assert_eq!(submitted.message, CONTACT_SUCCESS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_pending_is_busy() {
        let service = Arc::new(FormService::new(LatencySettings::default()));
        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .submit_login(&login("ada@example.com", "secret1"), &CancelToken::never())
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = service
            .submit_login(&login("ada@example.com", "secret1"), &CancelToken::never())
            .await;
        assert_eq!(second, Err(FormError::Busy));

        assert!(first.await.unwrap().is_ok());
        // Guard released once the first submission finished
        assert!(service
            .submit_login(&login("ada@example.com", "secret1"), &CancelToken::never())
            .await
            .is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_signup() {
        let service = Arc::new(FormService::new(LatencySettings::default()));
        let (handle, token) = cancel_pair();
        let task = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .submit_signup(&signup("Ada", "secret1", "secret1", true), &token)
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(500)).await;
        handle.cancel();
        assert_eq!(task.await.unwrap(), Err(FormError::Cancelled));
    }

    #[test]
    fn test_social_login_message() {
        assert_eq!(
            social_login_message(SocialProvider::Google),
            "Google login would be implemented with OAuth integration."
        );
    }
}
