//! Field validation rules for the registration form.
//!
//! Every rule is a pure function over the field value(s). Rules for a field
//! are checked in a fixed order and the first failure wins, so a field never
//! carries more than one error at a time.
//!
//! | Field            | Checks (in order)                         |
//! |------------------|-------------------------------------------|
//! | name             | required (whitespace-only counts as empty) |
//! | email            | required, `local@domain.tld` shape         |
//! | password         | required, min. 6 chars, letter + digit     |
//! | confirm password | required, equal to password                |

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::record::FormRecord;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex");
}

/// The four inputs of the form, in display and focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Label shown above the input (also used in "is required" messages).
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single validation failure. `Display` yields the inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),
    #[error("Invalid email address")]
    Format,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    TooShort,
    #[error("Password must contain at least one letter and one number")]
    Complexity,
    #[error("Passwords do not match")]
    Mismatch,
}

pub type Validation = std::result::Result<(), FieldError>;

pub fn validate_name(name: &str) -> Validation {
    if name.trim().is_empty() {
        return Err(FieldError::Required(Field::Name));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Validation {
    if email.is_empty() {
        return Err(FieldError::Required(Field::Email));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(FieldError::Format);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Validation {
    if password.is_empty() {
        return Err(FieldError::Required(Field::Password));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::TooShort);
    }
    // Only ASCII letters and digits are accepted, and both must occur.
    let only_alnum = password.chars().all(|c| c.is_ascii_alphanumeric());
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(only_alnum && has_letter && has_digit) {
        return Err(FieldError::Complexity);
    }
    Ok(())
}

pub fn validate_confirm_password(confirm: &str, password: &str) -> Validation {
    if confirm.is_empty() {
        return Err(FieldError::Required(Field::ConfirmPassword));
    }
    if confirm != password {
        return Err(FieldError::Mismatch);
    }
    Ok(())
}

/// Run the rule for `field` against the current record.
pub fn validate_field(field: Field, record: &FormRecord) -> Validation {
    match field {
        Field::Name => validate_name(&record.name),
        Field::Email => validate_email(&record.email),
        Field::Password => validate_password(&record.password),
        Field::ConfirmPassword => {
            validate_confirm_password(&record.confirm_password, &record.password)
        }
    }
}

/// Validate every field of `record`.
pub fn validate_record(record: &FormRecord) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        errors.apply(field, validate_field(field, record));
    }
    errors
}

/// Current per-field errors, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    inner: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.inner.get(&field).copied()
    }

    /// Record the outcome of a rule: `Err` stores the error, `Ok` clears it.
    pub fn apply(&mut self, field: Field, outcome: Validation) {
        match outcome {
            Ok(()) => {
                self.inner.remove(&field);
            }
            Err(err) => {
                self.inner.insert(field, err);
            }
        }
    }

    pub fn contains(&self, field: Field) -> bool {
        self.inner.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.inner.iter().map(|(f, e)| (*f, *e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_rejects_empty_and_whitespace() {
        assert_eq!(validate_name(""), Err(FieldError::Required(Field::Name)));
        assert_eq!(validate_name("   \t"), Err(FieldError::Required(Field::Name)));
        assert_eq!(validate_name("Jo"), Ok(()));
    }

    #[test]
    fn email_shapes() {
        assert_eq!(validate_email("a@b.co"), Ok(()));
        assert_eq!(validate_email("first.last@sub.example.org"), Ok(()));
        assert_eq!(validate_email("a@b"), Err(FieldError::Format));
        assert_eq!(validate_email("ab.co"), Err(FieldError::Format));
        assert_eq!(validate_email("a b@c.de"), Err(FieldError::Format));
        assert_eq!(validate_email("a@@b.co"), Err(FieldError::Format));
        assert_eq!(validate_email(""), Err(FieldError::Required(Field::Email)));
    }

    #[test]
    fn password_rules_in_order() {
        assert_eq!(
            validate_password(""),
            Err(FieldError::Required(Field::Password))
        );
        assert_eq!(validate_password("abc12"), Err(FieldError::TooShort));
        assert_eq!(validate_password("abcdef"), Err(FieldError::Complexity));
        assert_eq!(validate_password("123456"), Err(FieldError::Complexity));
        assert_eq!(validate_password("abc123"), Ok(()));
    }

    #[test]
    fn password_complexity_is_letters_and_digits_only() {
        assert_eq!(validate_password("abc123!"), Err(FieldError::Complexity));
        assert_eq!(validate_password("äbc1234"), Err(FieldError::Complexity));
        assert_eq!(validate_password("Secret2024"), Ok(()));
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // five chars, but more than six bytes
        assert_eq!(validate_password("äöü12"), Err(FieldError::TooShort));
    }

    #[test]
    fn confirm_password_rules() {
        assert_eq!(
            validate_confirm_password("", "abc123"),
            Err(FieldError::Required(Field::ConfirmPassword))
        );
        assert_eq!(
            validate_confirm_password("abc124", "abc123"),
            Err(FieldError::Mismatch)
        );
        assert_eq!(validate_confirm_password("abc123", "abc123"), Ok(()));
    }

    #[test]
    fn messages_match_form_copy() {
        assert_eq!(
            FieldError::Required(Field::Name).to_string(),
            "Name is required"
        );
        assert_eq!(
            FieldError::Required(Field::ConfirmPassword).to_string(),
            "Confirm password is required"
        );
        assert_eq!(FieldError::Format.to_string(), "Invalid email address");
        assert_eq!(
            FieldError::TooShort.to_string(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            FieldError::Complexity.to_string(),
            "Password must contain at least one letter and one number"
        );
        assert_eq!(FieldError::Mismatch.to_string(), "Passwords do not match");
    }

    #[test]
    fn validate_record_collects_one_error_per_field() {
        let errors = validate_record(&FormRecord::default());
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get(Field::Email),
            Some(FieldError::Required(Field::Email))
        );

        let ok = FormRecord::new("Jo", "jo@x.com", "abc123", "abc123");
        assert!(validate_record(&ok).is_empty());
    }

    #[test]
    fn apply_clears_on_success() {
        let mut errors = FieldErrors::default();
        errors.apply(Field::Email, Err(FieldError::Format));
        assert!(errors.contains(Field::Email));
        errors.apply(Field::Email, Ok(()));
        assert!(errors.is_empty());
    }
}
