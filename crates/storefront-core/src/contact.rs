//! Contact form model.

use std::fmt;

/// Fields of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Subject => "Subject",
            ContactField::Message => "Message",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactFieldError {
    #[error("{0} is required")]
    Required(ContactField),
    #[error("Email address is not valid")]
    InvalidEmail,
}

impl ContactForm {
    /// Check every field, returning all problems at once.
    pub fn validate(&self) -> Result<(), Vec<ContactFieldError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Subject, &self.subject),
            (ContactField::Message, &self.message),
        ] {
            if value.trim().is_empty() {
                errors.push(ContactFieldError::Required(field));
            }
        }

        if !self.email.trim().is_empty() && !looks_like_email(self.email.trim()) {
            errors.push(ContactFieldError::InvalidEmail);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Nice shop".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_reports_every_missing_field() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[1].to_string(), "Email is required");
    }

    #[test]
    fn test_email_shape() {
        for bad in ["ada", "@example.com", "ada@example", "ada@.com", "a@b@c.d"] {
            let form = ContactForm { email: bad.into(), ..filled() };
            assert_eq!(form.validate(), Err(vec![ContactFieldError::InvalidEmail]), "{bad}");
        }
    }

    #[test]
    fn test_clear() {
        let mut form = filled();
        form.clear();
        assert_eq!(form, ContactForm::default());
    }
}
