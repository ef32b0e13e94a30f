//! Shipping form validation.
//!
//! Validation runs two ways: per field on every edit for immediate feedback,
//! and exhaustively on submit. Any failing field blocks submission with its
//! specific message.

use std::collections::BTreeMap;

use encore_core::{Email, PostalCode};
use serde::Serialize;

/// A shipping form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Address,
    City,
    State,
    ZipCode,
    Country,
}

impl Field {
    /// All form fields, in display order.
    pub const ALL: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Address,
        Self::City,
        Self::State,
        Self::ZipCode,
        Self::Country,
    ];

    const fn required_message(self) -> &'static str {
        match self {
            Self::FirstName => "First name is required",
            Self::LastName => "Last name is required",
            Self::Email => "Email is required",
            Self::Address => "Address is required",
            Self::City => "City is required",
            Self::State => "State is required",
            Self::ZipCode => "Postal code is required",
            Self::Country => "Country is required",
        }
    }
}

/// Validated shipping details, produced only when every field passes.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: PostalCode,
    pub country: String,
}

/// Transient shipping form filled during checkout.
///
/// Created empty at checkout entry and discarded after order completion or
/// navigation away.
#[derive(Debug, Clone, Default)]
pub struct ShippingForm {
    first_name: String,
    last_name: String,
    email: String,
    address: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
    errors: BTreeMap<Field, String>,
}

impl ShippingForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's value, revalidating that field immediately.
    pub fn set_field(&mut self, field: Field, value: &str) {
        *self.value_mut(field) = value.to_owned();
        match validate_field(field, value) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(message) => {
                self.errors.insert(field, message);
            }
        }
    }

    /// The current raw value of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::ZipCode => &self.zip_code,
            Field::Country => &self.country,
        }
    }

    /// The current validation error for a field, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// All current validation errors, in display order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Validate every field exhaustively.
    ///
    /// Returns the validated details when all fields pass; otherwise records
    /// per-field messages and returns `None`.
    pub fn validate(&mut self) -> Option<ShippingDetails> {
        for field in Field::ALL {
            match validate_field(field, self.value(field)) {
                Ok(()) => {
                    self.errors.remove(&field);
                }
                Err(message) => {
                    self.errors.insert(field, message);
                }
            }
        }

        if !self.errors.is_empty() {
            return None;
        }

        Some(ShippingDetails {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: Email::parse(self.email.trim()).ok()?,
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            zip_code: PostalCode::parse(self.zip_code.trim()).ok()?,
            country: self.country.trim().to_owned(),
        })
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::ZipCode => &mut self.zip_code,
            Field::Country => &mut self.country,
        }
    }
}

/// Validate a single field value.
fn validate_field(field: Field, value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(field.required_message().to_owned());
    }

    match field {
        Field::Email => Email::parse(trimmed)
            .map(|_| ())
            .map_err(|_| "Enter a valid email address".to_owned()),
        Field::ZipCode => PostalCode::parse(trimmed)
            .map(|_| ())
            .map_err(|_| "Enter a valid postal code (3 to 10 letters or digits)".to_owned()),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ShippingForm {
        let mut form = ShippingForm::new();
        form.set_field(Field::FirstName, "Alex");
        form.set_field(Field::LastName, "Rivera");
        form.set_field(Field::Email, "alex@example.com");
        form.set_field(Field::Address, "123 Main St");
        form.set_field(Field::City, "Austin");
        form.set_field(Field::State, "TX");
        form.set_field(Field::ZipCode, "78701");
        form.set_field(Field::Country, "USA");
        form
    }

    #[test]
    fn test_blank_form_reports_every_field() {
        let mut form = ShippingForm::new();
        assert!(form.validate().is_none());

        for field in Field::ALL {
            assert_eq!(form.error(field), Some(field.required_message()));
        }
    }

    #[test]
    fn test_invalid_email_blocks_with_email_error_only() {
        let mut form = valid_form();
        form.set_field(Field::Email, "not-an-email");

        assert!(form.validate().is_none());
        assert_eq!(form.error(Field::Email), Some("Enter a valid email address"));

        // No other field carries an error
        let errors: Vec<Field> = form.errors().map(|(field, _)| field).collect();
        assert_eq!(errors, vec![Field::Email]);
    }

    #[test]
    fn test_incremental_validation_on_edit() {
        let mut form = ShippingForm::new();

        form.set_field(Field::Email, "nope");
        assert!(form.error(Field::Email).is_some());

        form.set_field(Field::Email, "alex@example.com");
        assert_eq!(form.error(Field::Email), None);
    }

    #[test]
    fn test_postal_code_rules() {
        let mut form = valid_form();

        form.set_field(Field::ZipCode, "12");
        assert!(form.error(Field::ZipCode).is_some());

        form.set_field(Field::ZipCode, "123 45");
        assert!(form.error(Field::ZipCode).is_some());

        form.set_field(Field::ZipCode, "SW1A1AA");
        assert_eq!(form.error(Field::ZipCode), None);
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let mut form = valid_form();
        form.set_field(Field::City, "   ");

        assert!(form.validate().is_none());
        assert_eq!(form.error(Field::City), Some("City is required"));
    }

    #[test]
    fn test_valid_form_produces_trimmed_details() {
        let mut form = valid_form();
        form.set_field(Field::FirstName, "  Alex  ");

        let details = form.validate().unwrap();
        assert_eq!(details.first_name, "Alex");
        assert_eq!(details.email.as_str(), "alex@example.com");
        assert_eq!(details.zip_code.as_str(), "78701");
    }
}
