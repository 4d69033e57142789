#![forbid(unsafe_code)]

//! Corporate gifting: the quote request form and the hamper selection.
//!
//! [`LeadForm::validate`] checks every field and reports all problems at
//! once. [`LeadDraft`] is the editing state behind the form: typing into a
//! field clears that field's error, and a successful submit hands back the
//! form and resets the draft.
//!
//! | Field | Rule |
//! |-------|------|
//! | name, company, requirements | not blank |
//! | email | not blank, `local@domain.tld` with no whitespace |
//! | phone | not blank, at least 10 of digits, spaces, `-`, `+`, `(`, `)` |

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::product::Product;

/// Categories always offered as corporate hampers.
pub const CORPORATE_CATEGORIES: [&str; 2] = ["Luxury", "Corporate"];
/// Price from which any product qualifies as a corporate hamper.
pub const CORPORATE_MIN_PRICE: f64 = 1000.0;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static PHONE_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\-+()]{10,}$"));

fn pattern_matches(pattern: &LazyLock<Result<Regex, regex::Error>>, value: &str) -> bool {
    match LazyLock::force(pattern) {
        Ok(re) => re.is_match(value),
        Err(err) => {
            tracing::error!(error = %err, "lead form pattern failed to compile");
            false
        }
    }
}

/// Products suggested on the corporate gifting page: luxury and corporate
/// ranges, plus anything priced at or above [`CORPORATE_MIN_PRICE`].
#[must_use]
pub fn corporate_hampers(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| {
            CORPORATE_CATEGORIES.contains(&p.category_or_brand.as_str())
                || p.current_price >= CORPORATE_MIN_PRICE
        })
        .collect()
}

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeadField {
    Name,
    Company,
    Email,
    Phone,
    Requirements,
}

impl LeadField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Company,
        Self::Email,
        Self::Phone,
        Self::Requirements,
    ];
}

/// What is wrong with one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadFieldError {
    Required(LeadField),
    InvalidEmail,
    InvalidPhone,
}

impl LeadFieldError {
    /// The field the error belongs to.
    #[must_use]
    pub const fn field(self) -> LeadField {
        match self {
            Self::Required(field) => field,
            Self::InvalidEmail => LeadField::Email,
            Self::InvalidPhone => LeadField::Phone,
        }
    }
}

impl fmt::Display for LeadFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Required(LeadField::Name) => "Name is required",
            Self::Required(LeadField::Company) => "Company name is required",
            Self::Required(LeadField::Email) => "Email is required",
            Self::Required(LeadField::Phone) => "Phone number is required",
            Self::Required(LeadField::Requirements) => "Please describe your requirements",
            Self::InvalidEmail => "Please enter a valid email",
            Self::InvalidPhone => "Please enter a valid phone number",
        };
        f.write_str(message)
    }
}

impl std::error::Error for LeadFieldError {}

/// Every field error from one validation, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadErrors {
    errors: Vec<LeadFieldError>,
}

impl LeadErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error for `field`, if any.
    #[must_use]
    pub fn get(&self, field: LeadField) -> Option<LeadFieldError> {
        self.errors.iter().copied().find(|e| e.field() == field)
    }

    /// Drop the error for `field`. Returns whether there was one.
    pub fn clear(&mut self, field: LeadField) -> bool {
        let before = self.errors.len();
        self.errors.retain(|e| e.field() != field);
        self.errors.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = LeadFieldError> + '_ {
        self.errors.iter().copied()
    }
}

impl fmt::Display for LeadErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LeadErrors {}

/// A corporate quote request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadForm {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub requirements: String,
}

impl LeadForm {
    #[must_use]
    pub fn value(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Company => &self.company,
            LeadField::Email => &self.email,
            LeadField::Phone => &self.phone,
            LeadField::Requirements => &self.requirements,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let slot = match field {
            LeadField::Name => &mut self.name,
            LeadField::Company => &mut self.company,
            LeadField::Email => &mut self.email,
            LeadField::Phone => &mut self.phone,
            LeadField::Requirements => &mut self.requirements,
        };
        *slot = value.into();
    }

    /// Check every field. Blank fields report `Required`; email and phone
    /// are pattern-checked only when present.
    pub fn validate(&self) -> Result<(), LeadErrors> {
        let errors: Vec<LeadFieldError> = LeadField::ALL
            .into_iter()
            .filter_map(|field| self.check(field))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LeadErrors { errors })
        }
    }

    fn check(&self, field: LeadField) -> Option<LeadFieldError> {
        let value = self.value(field);
        if value.trim().is_empty() {
            return Some(LeadFieldError::Required(field));
        }
        let (pattern, error) = match field {
            LeadField::Email => (&EMAIL_PATTERN, LeadFieldError::InvalidEmail),
            LeadField::Phone => (&PHONE_PATTERN, LeadFieldError::InvalidPhone),
            _ => return None,
        };
        (!pattern_matches(pattern, value)).then_some(error)
    }
}

/// Editing state of the quote form.
#[derive(Debug, Clone, Default)]
pub struct LeadDraft {
    form: LeadForm,
    errors: LeadErrors,
}

impl LeadDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    /// Errors from the last failed submit, minus fields edited since.
    #[must_use]
    pub fn errors(&self) -> &LeadErrors {
        &self.errors
    }

    /// Typing into a field replaces its value and clears its error.
    pub fn input(&mut self, field: LeadField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Validate. On success the filled form is returned and the draft is
    /// reset; on failure the errors are kept for display.
    pub fn submit(&mut self) -> Result<LeadForm, &LeadErrors> {
        match self.form.validate() {
            Ok(()) => {
                self.errors = LeadErrors::default();
                tracing::info!(company = %self.form.company, "corporate quote requested");
                Ok(std::mem::take(&mut self.form))
            }
            Err(errors) => {
                tracing::debug!(count = errors.len(), "quote form rejected");
                self.errors = errors;
                Err(&self.errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> LeadForm {
        LeadForm {
            name: "Asha Rao".to_owned(),
            company: "Kite Labs".to_owned(),
            email: "asha@kitelabs.in".to_owned(),
            phone: "+91 (80) 4567-8901".to_owned(),
            requirements: "200 hampers for Diwali".to_owned(),
        }
    }

    #[test]
    fn complete_form_is_valid() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn blank_form_reports_every_field() {
        let errors = LeadForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        let fields: Vec<LeadField> = errors.iter().map(LeadFieldError::field).collect();
        assert_eq!(fields, LeadField::ALL.to_vec());
        assert_eq!(
            errors.get(LeadField::Company).map(|e| e.to_string()).as_deref(),
            Some("Company name is required")
        );
        assert_eq!(
            errors.get(LeadField::Requirements).map(|e| e.to_string()).as_deref(),
            Some("Please describe your requirements")
        );
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let mut form = filled();
        form.name = "   ".to_owned();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(LeadField::Name), Some(LeadFieldError::Required(LeadField::Name)));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn email_shape() {
        for good in ["a@b.co", "first.last@mail.example.org"] {
            let mut form = filled();
            form.email = good.to_owned();
            assert_eq!(form.validate(), Ok(()), "{good}");
        }
        for bad in ["asha", "asha@kitelabs", "@kitelabs.in", "asha @kitelabs.in", "a@@b.co"] {
            let mut form = filled();
            form.email = bad.to_owned();
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.get(LeadField::Email), Some(LeadFieldError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn phone_shape() {
        for good in ["9876543210", "+91 98765 43210", "(080) 4567-8901"] {
            let mut form = filled();
            form.phone = good.to_owned();
            assert_eq!(form.validate(), Ok(()), "{good}");
        }
        for bad in ["98765", "98765-4321x", "phone: 9876543210"] {
            let mut form = filled();
            form.phone = bad.to_owned();
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.get(LeadField::Phone), Some(LeadFieldError::InvalidPhone), "{bad}");
        }
    }

    #[test]
    fn missing_email_is_required_not_invalid() {
        let mut form = filled();
        form.email.clear();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(LeadField::Email), Some(LeadFieldError::Required(LeadField::Email)));
    }

    #[test]
    fn display_joins_messages() {
        let mut form = filled();
        form.email = "nope".to_owned();
        form.phone = "123".to_owned();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Please enter a valid email; Please enter a valid phone number"
        );
    }

    #[test]
    fn typing_clears_only_that_fields_error() {
        let mut draft = LeadDraft::new();
        assert_eq!(draft.submit().unwrap_err().len(), 5);

        draft.input(LeadField::Email, "a");
        assert_eq!(draft.errors().get(LeadField::Email), None);
        assert_eq!(draft.errors().len(), 4);
        assert!(draft.errors().get(LeadField::Name).is_some());

        // The new value is only checked on the next submit.
        let errors = draft.submit().unwrap_err();
        assert_eq!(errors.get(LeadField::Email), Some(LeadFieldError::InvalidEmail));
    }

    #[test]
    fn successful_submit_resets_draft() {
        let mut draft = LeadDraft::new();
        let expected = filled();
        for field in LeadField::ALL {
            draft.input(field, expected.value(field));
        }
        assert_eq!(draft.submit(), Ok(expected));
        assert_eq!(draft.form(), &LeadForm::default());
        assert!(draft.errors().is_empty());
    }

    #[test]
    fn hampers_by_category_or_price() {
        let products = vec![
            Product::new("1", "bar", "Milk Bar", "Chocolates", 199.0),
            Product::new("2", "tin", "Gold Tin", "Luxury", 799.0),
            Product::new("3", "desk", "Desk Box", "Corporate", 499.0),
            Product::new("4", "cake", "Opera Cake", "Cakes", 1000.0),
            Product::new("5", "truffle", "Truffle Box", "Chocolates", 999.0),
            Product::new("6", "lux", "Gift Box", "luxury", 299.0),
        ];
        let ids: Vec<&str> = corporate_hampers(&products)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }
}
