use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

/// Which tracked form a submission belongs to.
///
/// Selects the endpoint binding and the success copy. Forms other than the
/// two built-in ones are carried by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormIdentity {
    Registration,
    Affiliate,
    Named(String),
}

impl FormIdentity {
    pub fn as_str(&self) -> &str {
        match self {
            FormIdentity::Registration => "registration",
            FormIdentity::Affiliate => "affiliate",
            FormIdentity::Named(name) => name,
        }
    }
}

impl From<String> for FormIdentity {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "registration" => FormIdentity::Registration,
            "affiliate" => FormIdentity::Affiliate,
            _ => FormIdentity::Named(value.trim().to_string()),
        }
    }
}

impl From<FormIdentity> for String {
    fn from(value: FormIdentity) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for FormIdentity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FormIdentity::from(s.to_string()))
    }
}

impl fmt::Display for FormIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic input type. Only `Email` and `Phone` carry a shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    #[serde(alias = "tel")]
    Phone,
    TextArea,
}

/// Visual valid/invalid decoration of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldValidity {
    #[default]
    Unchecked,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub validity: FieldValidity,
}

impl FormField {
    pub fn new(name: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
            value: String::new(),
            validity: FieldValidity::Unchecked,
        }
    }

    pub fn text(name: &str) -> Self {
        Self::new(name, FieldKind::Text, false)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// The submit button of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

impl SubmitControl {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Current state of one tracked form: its fields in document order,
/// its submit control and where it is in the submission lifecycle.
#[derive(Debug, Clone)]
pub struct FormState {
    pub identity: FormIdentity,
    pub fields: Vec<FormField>,
    pub submit: SubmitControl,
    pub phase: SubmissionPhase,
}

impl FormState {
    pub fn new(identity: FormIdentity, fields: Vec<FormField>) -> Self {
        Self {
            identity,
            fields,
            submit: SubmitControl::new(DEFAULT_SUBMIT_LABEL),
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn with_submit_label(mut self, label: &str) -> Self {
        self.submit = SubmitControl::new(label);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Set a field's raw value. Returns false when no field has that name.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Clear every value and decoration, like a native form reset.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.validity = FieldValidity::Unchecked;
        }
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.value.is_empty())
    }
}

/// Shared handle to a form.
///
/// The event loop and an in-flight submission both hold one. The lock is
/// only ever taken for short synchronous updates, never across an await.
#[derive(Debug, Clone)]
pub struct FormHandle {
    inner: Arc<Mutex<FormState>>,
}

impl FormHandle {
    pub fn new(state: FormState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, FormState> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn identity(&self) -> FormIdentity {
        self.lock().identity.clone()
    }

    pub fn snapshot(&self) -> FormState {
        self.lock().clone()
    }
}
