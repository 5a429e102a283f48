use crate::form::form_model::{FieldValidity, FormIdentity, FormState, SubmitControl};
use crate::form::validator::{FieldIssue, ValidationReport};
use crate::notify::notification_model::{NotificationKind, NotificationRecord};
use crate::view::port::{FormView, Navigator, NotificationSurface};

// ============================================================================
// Console binding: the presentation ports rendered as terminal lines
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleView {
    pub verbose: bool,
}

impl ConsoleView {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl FormView for ConsoleView {
    fn render_submit(&self, form: &FormIdentity, control: &SubmitControl) {
        if self.verbose {
            let state = if control.disabled { "disabled" } else { "enabled" };
            println!("[{}] submit {} ({})", form, state, control.label);
        }
    }

    fn render_validity(&self, form: &FormIdentity, field: &str, validity: FieldValidity) {
        if self.verbose {
            println!("[{}] {} -> {}", form, field, validity_marker(validity));
        }
    }

    fn clear_fields(&self, form: &FormIdentity) {
        if self.verbose {
            println!("[{}] fields cleared", form);
        }
    }

    fn scroll_into_view(&self, _form: &FormIdentity) {}
}

impl NotificationSurface for ConsoleView {
    fn mount(&self, record: &NotificationRecord) {
        let marker = match record.kind {
            NotificationKind::Success => "\u{2713}",
            NotificationKind::Error => "\u{2717}",
        };
        println!("{} {}", marker, record.message);
    }

    fn begin_exit(&self, _id: u64) {}

    fn unmount(&self, _id: u64) {}
}

impl Navigator for ConsoleView {
    fn navigate(&self, target: &str) {
        println!("-> {}", target);
    }
}

fn validity_marker(validity: FieldValidity) -> &'static str {
    match validity {
        FieldValidity::Valid => "valid",
        FieldValidity::Invalid => "invalid",
        FieldValidity::Unchecked => "-",
    }
}

/// Format a validation run for terminal output.
///
/// Produces output like:
/// ```text
/// === registration ===
///   [valid]    full_name
///   [invalid]  email (not an email address)
///   [-]        phone
/// === 1 problem ===
/// ```
pub fn format_validation(form: &FormState, report: &ValidationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", form.identity));

    for field in &form.fields {
        let marker = format!("[{}]", validity_marker(field.validity));
        let reasons: Vec<&str> = report
            .issues
            .iter()
            .filter(|(name, _)| name == &field.name)
            .map(|(_, issue)| describe_issue(*issue))
            .collect();

        if reasons.is_empty() {
            out.push_str(&format!("  {:<10} {}\n", marker, field.name));
        } else {
            out.push_str(&format!(
                "  {:<10} {} ({})\n",
                marker,
                field.name,
                reasons.join(", ")
            ));
        }
    }

    let count = report.issues.len();
    let noun = if count == 1 { "problem" } else { "problems" };
    out.push_str(&format!("=== {} {} ===\n", count, noun));
    out
}

fn describe_issue(issue: FieldIssue) -> &'static str {
    match issue {
        FieldIssue::Required => "required",
        FieldIssue::EmailShape => "not an email address",
        FieldIssue::PhoneShape => "not a phone number",
    }
}
