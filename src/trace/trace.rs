use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::form::form_model::{FormIdentity, SubmissionPhase};
use crate::submit::error::SubmissionFault;

/// One line of the submission trace.
#[derive(Debug, Serialize)]
pub struct SubmissionTraceEvent {
    pub timestamp_ms: u128,
    pub form: String,
    pub phase: SubmissionPhase,

    pub payload_fingerprint: Option<String>,
    pub field_count: Option<usize>,

    pub fault: Option<String>,
    pub detail: Option<String>,
}

impl SubmissionTraceEvent {
    pub fn now(form: &FormIdentity, phase: SubmissionPhase) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            form: form.to_string(),
            phase,
            payload_fingerprint: None,
            field_count: None,
            fault: None,
            detail: None,
        }
    }

    pub fn with_payload(mut self, fingerprint: &str, field_count: usize) -> Self {
        self.payload_fingerprint = Some(fingerprint.to_string());
        self.field_count = Some(field_count);
        self
    }

    pub fn with_fault(mut self, fault: &SubmissionFault) -> Self {
        self.fault = Some(fault.tag().to_string());
        self.detail = Some(fault.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
