use serde::{Deserialize, Serialize};

use crate::form::form_model::FormIdentity;

/// User-facing copy for the submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub registration: String,
    pub affiliate: String,
    pub fallback: String,
    pub failure: String,
    pub invalid: String,
    pub busy_label: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            registration:
                "Thank you for registering! We'll notify you when the portal is ready.".into(),
            affiliate: "Thank you for your interest in becoming an affiliate partner! We'll contact you soon.".into(),
            fallback: "Thank you for your submission!".into(),
            failure: "Something went wrong. Please try again.".into(),
            invalid: "Please correct the highlighted fields.".into(),
            busy_label: "Processing...".into(),
        }
    }
}

impl MessageCatalog {
    pub fn success_for(&self, identity: &FormIdentity) -> &str {
        match identity {
            FormIdentity::Registration => &self.registration,
            FormIdentity::Affiliate => &self.affiliate,
            FormIdentity::Named(_) => &self.fallback,
        }
    }
}
