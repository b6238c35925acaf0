//! Field-level validation for the user forms.
//!
//! Forms hold the raw text the user typed so that invalid input can be
//! represented and reported per field. A form only becomes a [`User`] or a
//! [`NewUser`] once every rule passes.

use std::{collections::BTreeMap, fmt};

use cherry_api::{Category, NewUser, User, UserId};
use validator::ValidateEmail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Category,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Required,
    Email,
    Category,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Category => "category",
        }
    }
}

/// A failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

impl FieldError {
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Renders the message, or the kind when no message was attached.
impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => f.write_str(self.kind.as_str()),
        }
    }
}

/// Errors of a form, grouped by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, Vec<FieldError>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, field: Field, error: FieldError) {
        self.0.entry(field).or_default().push(error);
    }

    /// Errors on `field`, empty when it is valid
    pub fn get(&self, field: Field) -> &[FieldError] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has(&self, field: Field, kind: ErrorKind) -> bool {
        self.get(field).iter().any(|e| e.kind == kind)
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0
            .iter()
            .flat_map(|(field, errors)| errors.iter().map(move |e| (*field, e)))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

/// Raw, possibly invalid, field values of a user form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub category: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self::from(&User::default())
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            category: user.category.to_string(),
        }
    }
}

impl UserForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            category: category.into(),
        }
    }

    /// Run every rule; each field is checked independently.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.push(
                Field::Name,
                FieldError::new(ErrorKind::Required).with_message("Name is required"),
            );
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(
                Field::Email,
                FieldError::new(ErrorKind::Required).with_message("Email is required"),
            );
        } else if !email.validate_email() {
            errors.push(
                Field::Email,
                FieldError::new(ErrorKind::Email).with_message("Email address is not valid"),
            );
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.push(
                Field::Category,
                FieldError::new(ErrorKind::Required).with_message("Category is required"),
            );
        } else if category.parse::<Category>().is_err() {
            errors.push(
                Field::Category,
                FieldError::new(ErrorKind::Category)
                    .with_message("Category must be admin, user or guest"),
            );
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn to_new_user(&self) -> Result<NewUser, FormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        // `validate` has accepted the category
        let category = self.category.trim().parse().unwrap_or_default();
        Ok(NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            category,
        })
    }

    pub fn to_user(&self, id: UserId) -> Result<User, FormErrors> {
        self.to_new_user().map(|new| User {
            id,
            ..User::from(new)
        })
    }
}
