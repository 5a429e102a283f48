use std::time::Duration;

use thiserror::Error;

use crate::form::form_model::FormIdentity;

/// Failure below the controller: the request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Why a dispatched submission failed.
///
/// All variants end the same way for the user (one generic error
/// notification); the detail goes to the logs and the trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionFault {
    #[error("no endpoint bound to form '{0}'")]
    Unbound(FormIdentity),

    #[error("transport fault: {0}")]
    Transport(String),

    #[error("no response within {0:?}")]
    TimedOut(Duration),

    #[error("submission aborted")]
    Aborted,

    #[error("endpoint rejected submission with status {status}")]
    Rejected { status: u16, body: String },
}

impl SubmissionFault {
    /// Short machine-readable tag for trace lines.
    pub fn tag(&self) -> &'static str {
        match self {
            SubmissionFault::Unbound(_) => "unbound",
            SubmissionFault::Transport(_) => "transport",
            SubmissionFault::TimedOut(_) => "timed_out",
            SubmissionFault::Aborted => "aborted",
            SubmissionFault::Rejected { .. } => "rejected",
        }
    }
}
