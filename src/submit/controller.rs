use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::form::form_model::{FieldValidity, FormHandle, FormIdentity, SubmissionPhase};
use crate::form::payload::{SubmissionPayload, SubmissionRequest};
use crate::form::validator::{self, ValidationReport};
use crate::notify::presenter::NotificationPresenter;
use crate::submit::endpoint::EndpointTable;
use crate::submit::error::SubmissionFault;
use crate::submit::messages::MessageCatalog;
use crate::submit::redirect::RedirectHandle;
use crate::submit::transport::SubmissionTransport;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::SubmissionTraceEvent;
use crate::view::port::{FormView, Navigator};

pub const DEFAULT_REDIRECT_TARGET: &str = "./index.html";
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure(SubmissionFault),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }

    pub fn fault(&self) -> Option<&SubmissionFault> {
        match self {
            SubmissionOutcome::Success => None,
            SubmissionOutcome::Failure(fault) => Some(fault),
        }
    }
}

/// What one call to [`SubmissionController::submit`] did.
#[derive(Debug)]
pub enum SubmissionReport {
    /// The submit control was disabled: a submission of this form is
    /// already in flight. Nothing was dispatched.
    Ignored,

    /// Validation failed with gating on. Nothing was dispatched.
    Blocked(ValidationReport),

    /// A request was dispatched (or its binding was missing) and the form
    /// went back to idle.
    Completed {
        outcome: SubmissionOutcome,
        payload_fingerprint: String,
        redirect: Option<RedirectHandle>,
    },
}

impl SubmissionReport {
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            SubmissionReport::Completed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<&RedirectHandle> {
        match self {
            SubmissionReport::Completed { redirect, .. } => redirect.as_ref(),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome().is_some_and(SubmissionOutcome::is_success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSettings {
    pub redirect_target: String,
    pub redirect_delay: Duration,
    pub request_timeout: Duration,
    /// Refuse to dispatch a form that fails validation.
    pub block_invalid: bool,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            redirect_target: DEFAULT_REDIRECT_TARGET.to_string(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            block_invalid: true,
        }
    }
}

/// Abort tokens keyed by submission id. Several handles may share one
/// identity, so each submission owns its own entry.
type InFlight = Mutex<HashMap<u64, (FormIdentity, CancellationToken)>>;

/// Drives `Idle -> Submitting -> {Succeeded, Failed} -> Idle` for any
/// number of tracked forms.
///
/// The disabled submit control is the re-entrancy guard: a second submit of
/// a form whose control is disabled returns [`SubmissionReport::Ignored`].
/// Failures never escape; every path ends back in `Idle`.
pub struct SubmissionController<T: SubmissionTransport> {
    transport: T,
    endpoints: EndpointTable,
    presenter: Arc<NotificationPresenter>,
    view: Arc<dyn FormView>,
    navigator: Arc<dyn Navigator>,
    settings: SubmissionSettings,
    messages: MessageCatalog,
    in_flight: InFlight,
    next_submission: AtomicU64,
    tracer: Option<Arc<TraceLogger>>,
}

impl<T: SubmissionTransport> SubmissionController<T> {
    pub fn new(
        transport: T,
        endpoints: EndpointTable,
        presenter: Arc<NotificationPresenter>,
        view: Arc<dyn FormView>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            endpoints,
            presenter,
            view,
            navigator,
            settings: SubmissionSettings::default(),
            messages: MessageCatalog::default(),
            in_flight: Mutex::new(HashMap::new()),
            next_submission: AtomicU64::new(1),
            tracer: None,
        }
    }

    pub fn with_settings(mut self, settings: SubmissionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_tracer(mut self, tracer: Arc<TraceLogger>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn presenter(&self) -> &NotificationPresenter {
        &self.presenter
    }

    pub fn settings(&self) -> &SubmissionSettings {
        &self.settings
    }

    /// Keystroke hook: store the value and re-decorate that one field.
    pub fn input(&self, form: &FormHandle, field: &str, value: &str) -> Option<FieldValidity> {
        let mut state = form.lock();
        validator::on_input(&mut state, field, value, self.view.as_ref())
    }

    /// Abort every in-flight submission of `identity`. Returns whether any
    /// was found.
    pub fn abort(&self, identity: &FormIdentity) -> bool {
        let in_flight = lock_in_flight(&self.in_flight);
        let mut aborted = 0;
        for (id, (form, token)) in in_flight.iter() {
            if form == identity {
                info!(form = %identity, submission = id, "aborting in-flight submission");
                token.cancel();
                aborted += 1;
            }
        }
        aborted > 0
    }

    pub fn is_in_flight(&self, identity: &FormIdentity) -> bool {
        lock_in_flight(&self.in_flight)
            .values()
            .any(|(form, _)| form == identity)
    }

    /// Run one submission of `form` to completion.
    pub async fn submit(&self, form: &FormHandle) -> SubmissionReport {
        let (identity, payload, original_label) = {
            let mut state = form.lock();
            if state.submit.disabled {
                debug!(form = %state.identity, "submit control disabled, ignoring");
                return SubmissionReport::Ignored;
            }

            let report = validator::validate_form(&mut state, self.view.as_ref());
            if !report.is_valid() {
                warn!(form = %state.identity, fields = ?report.invalid_fields(), "form failed validation");
                if self.settings.block_invalid {
                    let identity = state.identity.clone();
                    drop(state);
                    self.presenter.error(&self.messages.invalid);
                    self.trace(
                        SubmissionTraceEvent::now(&identity, SubmissionPhase::Idle)
                            .with_detail("blocked by validation"),
                    );
                    return SubmissionReport::Blocked(report);
                }
            }

            let original = std::mem::replace(&mut state.submit.label, self.messages.busy_label.clone());
            state.submit.disabled = true;
            state.phase = SubmissionPhase::Submitting;
            self.view.render_submit(&state.identity, &state.submit);

            (state.identity.clone(), SubmissionPayload::from_form(&state), original)
        };

        let fingerprint = payload.fingerprint();
        let token = CancellationToken::new();
        let submission = self.next_submission.fetch_add(1, Ordering::Relaxed);
        lock_in_flight(&self.in_flight).insert(submission, (identity.clone(), token.clone()));

        let mut cleanup = Cleanup {
            submission,
            form: form.clone(),
            view: Arc::clone(&self.view),
            in_flight: &self.in_flight,
            original_label,
            succeeded: false,
        };

        self.trace(
            SubmissionTraceEvent::now(&identity, SubmissionPhase::Submitting)
                .with_payload(&fingerprint, payload.len()),
        );
        info!(form = %identity, fields = payload.len(), "dispatching submission");

        let outcome = self.dispatch(&identity, &payload, &token).await;

        let redirect = match &outcome {
            SubmissionOutcome::Success => {
                form.lock().phase = SubmissionPhase::Succeeded;
                self.trace(
                    SubmissionTraceEvent::now(&identity, SubmissionPhase::Succeeded)
                        .with_payload(&fingerprint, payload.len()),
                );
                self.presenter.success(self.messages.success_for(&identity));
                cleanup.succeeded = true;

                Some(RedirectHandle::schedule(
                    Arc::clone(&self.navigator),
                    &self.settings.redirect_target,
                    self.settings.redirect_delay,
                ))
            }
            SubmissionOutcome::Failure(fault) => {
                form.lock().phase = SubmissionPhase::Failed;
                self.trace(
                    SubmissionTraceEvent::now(&identity, SubmissionPhase::Failed)
                        .with_payload(&fingerprint, payload.len())
                        .with_fault(fault),
                );
                self.presenter.error(&self.messages.failure);
                None
            }
        };

        drop(cleanup);
        self.trace(SubmissionTraceEvent::now(&identity, SubmissionPhase::Idle));

        SubmissionReport::Completed {
            outcome,
            payload_fingerprint: fingerprint,
            redirect,
        }
    }

    async fn dispatch(
        &self,
        identity: &FormIdentity,
        payload: &SubmissionPayload,
        token: &CancellationToken,
    ) -> SubmissionOutcome {
        let Some(binding) = self.endpoints.resolve(identity) else {
            error!(form = %identity, "no endpoint bound");
            return SubmissionOutcome::Failure(SubmissionFault::Unbound(identity.clone()));
        };

        let request = SubmissionRequest::new(payload);
        let timeout = self.settings.request_timeout;

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!(form = %identity, "submission aborted");
                return SubmissionOutcome::Failure(SubmissionFault::Aborted);
            }
            result = tokio::time::timeout(timeout, self.transport.post(binding, &request)) => result,
        };

        match result {
            Err(_) => {
                error!(form = %identity, ?timeout, "submission timed out");
                SubmissionOutcome::Failure(SubmissionFault::TimedOut(timeout))
            }
            Ok(Err(e)) => {
                error!(form = %identity, error = %e, "error sending submission");
                SubmissionOutcome::Failure(SubmissionFault::Transport(e.to_string()))
            }
            Ok(Ok(response)) if response.is_success() => {
                info!(form = %identity, status = response.status, "submission accepted");
                SubmissionOutcome::Success
            }
            Ok(Ok(response)) => {
                error!(
                    form = %identity,
                    status = response.status,
                    body = %response.body,
                    "endpoint rejected submission"
                );
                SubmissionOutcome::Failure(SubmissionFault::Rejected {
                    status: response.status,
                    body: response.body,
                })
            }
        }
    }

    fn trace(&self, event: SubmissionTraceEvent) {
        if let Some(tracer) = &self.tracer {
            tracer.log(&event);
        }
    }
}

/// Return-to-idle step. Runs exactly once, when dropped, whichever way the
/// submission ended, including the submission future itself being dropped.
struct Cleanup<'a> {
    submission: u64,
    form: FormHandle,
    view: Arc<dyn FormView>,
    in_flight: &'a InFlight,
    original_label: String,
    succeeded: bool,
}

impl Drop for Cleanup<'_> {
    fn drop(&mut self) {
        let mut state = self.form.lock();
        lock_in_flight(self.in_flight).remove(&self.submission);

        if self.succeeded {
            state.reset();
            self.view.clear_fields(&state.identity);
        }

        state.submit.label = std::mem::take(&mut self.original_label);
        state.submit.disabled = false;
        state.phase = SubmissionPhase::Idle;

        self.view.render_submit(&state.identity, &state.submit);
        self.view.scroll_into_view(&state.identity);
    }
}

fn lock_in_flight(in_flight: &InFlight) -> MutexGuard<'_, HashMap<u64, (FormIdentity, CancellationToken)>> {
    in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
