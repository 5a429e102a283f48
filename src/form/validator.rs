use std::sync::LazyLock;

use regex::Regex;

use crate::form::form_model::{FieldKind, FieldValidity, FormField, FormState};
use crate::view::port::FormView;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Required,
    EmailShape,
    PhoneShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<(String, FieldIssue)>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn invalid_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.issues.iter().map(|(name, _)| name.as_str()).collect();
        names.dedup();
        names
    }
}

/// `local@domain.tld` shape, no whitespace, exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Optional leading `+`, first digit 1-9, up to 15 more ASCII digits.
/// Whitespace anywhere in the value is ignored.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_SHAPE.is_match(&compact)
}

/// Full-form check run at submission time.
///
/// Required fields are decorated valid or invalid by emptiness. Email and
/// phone fields holding a value are additionally shape-checked and marked
/// invalid on mismatch. Every decoration written is mirrored to the view.
pub fn validate_form(form: &mut FormState, view: &dyn FormView) -> ValidationReport {
    let mut issues = Vec::new();

    for field in &mut form.fields {
        let mut touched = false;

        if field.required {
            touched = true;
            if field.trimmed().is_empty() {
                field.validity = FieldValidity::Invalid;
                issues.push((field.name.clone(), FieldIssue::Required));
            } else {
                field.validity = FieldValidity::Valid;
            }
        }

        if let Some(issue) = shape_issue(field) {
            field.validity = FieldValidity::Invalid;
            issues.push((field.name.clone(), issue));
            touched = true;
        }

        if touched {
            view.render_validity(&form.identity, &field.name, field.validity);
        }
    }

    ValidationReport { issues }
}

fn shape_issue(field: &FormField) -> Option<FieldIssue> {
    let value = field.trimmed();
    if value.is_empty() {
        return None;
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Some(FieldIssue::EmailShape),
        FieldKind::Phone if !is_valid_phone(value) => Some(FieldIssue::PhoneShape),
        _ => None,
    }
}

/// Keystroke pass: store the new value and re-decorate that one field.
///
/// Only the required/empty rule applies here; shape checks wait for the
/// full pass. Returns the new decoration, or `None` for an unknown field.
pub fn on_input(
    form: &mut FormState,
    field_name: &str,
    value: &str,
    view: &dyn FormView,
) -> Option<FieldValidity> {
    let identity = form.identity.clone();
    let field = form.field_mut(field_name)?;
    field.value = value.to_string();

    field.validity = if field.required && field.trimmed().is_empty() {
        FieldValidity::Invalid
    } else {
        FieldValidity::Valid
    };

    view.render_validity(&identity, &field.name, field.validity);
    Some(field.validity)
}
