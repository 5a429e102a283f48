use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cli::config::{
    AppConfig, build_endpoint_table, build_form, build_settings, notification_timing,
};
use crate::cli::console::{ConsoleView, format_validation};
use crate::form::form_model::{FormHandle, FormIdentity, FormState};
use crate::form::validator::validate_form;
use crate::notify::presenter::NotificationPresenter;
use crate::submit::controller::{SubmissionController, SubmissionReport};
use crate::submit::transport::HttpTransport;
use crate::trace::logger::TraceLogger;
use crate::view::port::NullView;

// ============================================================================
// validate subcommand
// ============================================================================

/// Validate field values and return whether the form passed.
pub fn cmd_validate(
    config: &AppConfig,
    form: &str,
    fields: &[(String, String)],
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut state = filled_form(config, form, fields)?;
    let report = validate_form(&mut state, &NullView);
    print!("{}", format_validation(&state, &report));
    Ok(report.is_valid())
}

// ============================================================================
// submit subcommand
// ============================================================================

/// Submit one form and return whether the endpoint accepted it.
pub async fn cmd_submit(
    config: &AppConfig,
    form: &str,
    fields: &[(String, String)],
    timeout_ms: Option<u64>,
    allow_invalid: bool,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let state = filled_form(config, form, fields)?;
    let identity = state.identity.clone();

    let view = Arc::new(ConsoleView::new(verbose > 0));
    let (display, exit_transition) = notification_timing(config);
    let presenter = Arc::new(
        NotificationPresenter::with_timing(view.clone(), display, exit_transition)
            .with_corner(config.notification_corner),
    );

    let mut settings = build_settings(config);
    if let Some(ms) = timeout_ms {
        settings.request_timeout = Duration::from_millis(ms);
    }
    if allow_invalid {
        settings.block_invalid = false;
    }

    let tracer = match &config.trace_log {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let controller = SubmissionController::new(
        HttpTransport::new(),
        build_endpoint_table(config),
        presenter,
        view.clone(),
        view,
    )
    .with_settings(settings)
    .with_messages(config.messages.clone())
    .with_tracer(Arc::new(tracer));

    info!(form = %identity, "submitting from command line");
    let handle = FormHandle::new(state);
    let report = controller.submit(&handle).await;

    match &report {
        SubmissionReport::Ignored => {
            eprintln!("Submission of '{}' already in progress", identity);
        }
        SubmissionReport::Blocked(validation) => {
            eprint!("{}", format_validation(&handle.snapshot(), validation));
        }
        SubmissionReport::Completed {
            outcome,
            payload_fingerprint,
            redirect,
        } => {
            if verbose > 0 {
                println!("payload {}", payload_fingerprint);
            }
            if let Some(fault) = outcome.fault() {
                eprintln!("Submission failed: {}", fault);
            }
            // No page to leave from the terminal.
            if let Some(redirect) = redirect {
                redirect.cancel();
                println!("Next page: {}", redirect.target());
            }
        }
    }

    controller.presenter().dismiss();
    Ok(report.is_success())
}

// ============================================================================
// config subcommand
// ============================================================================

/// Render the resolved configuration with passwords masked.
pub fn cmd_config(config: &AppConfig) -> Result<String, Box<dyn std::error::Error>> {
    let mut masked = config.clone();
    for endpoint in masked.endpoints.values_mut() {
        if endpoint.password.is_some() {
            endpoint.password = Some("********".into());
        }
    }
    Ok(serde_yaml::to_string(&masked)?)
}

// ============================================================================
// Helpers
// ============================================================================

fn filled_form(
    config: &AppConfig,
    form: &str,
    fields: &[(String, String)],
) -> Result<FormState, Box<dyn std::error::Error>> {
    let identity = FormIdentity::from(form.to_string());
    let mut state = build_form(config, &identity)
        .ok_or_else(|| format!("no form layout configured for '{}'", identity))?;

    for (name, value) in fields {
        if !state.set_value(name, value) {
            return Err(format!("form '{}' has no field '{}'", identity, name).into());
        }
    }

    Ok(state)
}
