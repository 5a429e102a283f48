use std::collections::BTreeMap;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::form_model::{FieldKind, FormField, FormIdentity, FormState};
use crate::notify::notification_model::Corner;
use crate::submit::controller::{DEFAULT_REDIRECT_TARGET, SubmissionSettings};
use crate::submit::endpoint::{EndpointBinding, EndpointTable};
use crate::submit::messages::MessageCatalog;

pub const DEFAULT_CONFIG_PATH: &str = "portal.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "portal-forms",
    version,
    about = "Validate and submit portal forms to their data-collection endpoints"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: portal.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check field values against the form's rules without sending anything
    Validate {
        /// Form identity, e.g. registration or affiliate
        #[arg(long)]
        form: String,

        /// Field value as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Submit one form to its bound endpoint
    Submit {
        /// Form identity, e.g. registration or affiliate
        #[arg(long)]
        form: String,

        /// Field value as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Override the request timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Dispatch even when validation fails
        #[arg(long, default_value_t = false)]
        allow_invalid: bool,
    },

    /// Print the resolved configuration as YAML
    Config,
}

/// Parse a `name=value` pair. The value may be empty or contain `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Optional YAML config file: `portal.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_endpoints")]
    pub endpoints: BTreeMap<FormIdentity, EndpointConfig>,
    #[serde(default = "default_forms")]
    pub forms: BTreeMap<FormIdentity, FormLayout>,
    #[serde(default)]
    pub messages: MessageCatalog,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub notification_corner: Corner,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default = "default_redirect_target")]
    pub redirect_target: String,
    #[serde(default)]
    pub trace_log: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            forms: default_forms(),
            messages: MessageCatalog::default(),
            timing: TimingConfig::default(),
            notification_corner: Corner::default(),
            validation: ValidationConfig::default(),
            redirect_target: default_redirect_target(),
            trace_log: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl EndpointConfig {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            username: None,
            password: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormLayout {
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FieldConfig {
    fn new(name: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
        }
    }
}

/// All durations in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    #[serde(default = "default_display_ms")]
    pub notification_display_ms: u64,

    #[serde(default = "default_exit_ms")]
    pub notification_exit_ms: u64,

    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_display_ms: 5000,
            notification_exit_ms: 300,
            redirect_delay_ms: 1500,
            request_timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationConfig {
    #[serde(default = "default_true")]
    pub block_invalid: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            block_invalid: true,
        }
    }
}

// Serde default helpers
fn default_true() -> bool { true }
fn default_display_ms() -> u64 { 5000 }
fn default_exit_ms() -> u64 { 300 }
fn default_redirect_delay_ms() -> u64 { 1500 }
fn default_request_timeout_ms() -> u64 { 15_000 }
fn default_submit_label() -> String { "Submit".to_string() }
fn default_redirect_target() -> String { DEFAULT_REDIRECT_TARGET.to_string() }

fn default_endpoints() -> BTreeMap<FormIdentity, EndpointConfig> {
    BTreeMap::from([
        (
            FormIdentity::Registration,
            EndpointConfig::new("https://sheetdb.io/api/v1/je0qjcwoqogvc"),
        ),
        (
            FormIdentity::Affiliate,
            EndpointConfig::new("https://sheetdb.io/api/v1/tnu53nlbufq35"),
        ),
    ])
}

fn default_forms() -> BTreeMap<FormIdentity, FormLayout> {
    BTreeMap::from([
        (
            FormIdentity::Registration,
            FormLayout {
                submit_label: "Register Now".into(),
                fields: vec![
                    FieldConfig::new("full_name", FieldKind::Text, true),
                    FieldConfig::new("email", FieldKind::Email, true),
                    FieldConfig::new("phone", FieldKind::Phone, false),
                    FieldConfig::new("organization", FieldKind::Text, false),
                ],
            },
        ),
        (
            FormIdentity::Affiliate,
            FormLayout {
                submit_label: "Become a Partner".into(),
                fields: vec![
                    FieldConfig::new("full_name", FieldKind::Text, true),
                    FieldConfig::new("email", FieldKind::Email, true),
                    FieldConfig::new("phone", FieldKind::Phone, true),
                    FieldConfig::new("company", FieldKind::Text, false),
                    FieldConfig::new("website", FieldKind::Text, false),
                    FieldConfig::new("message", FieldKind::TextArea, false),
                ],
            },
        ),
    ])
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. A missing file yields the defaults; an
/// unreadable or malformed one is an error.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content).map_err(|source| ConfigError::Parse {
            path: config_path.to_string(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Read {
            path: config_path.to_string(),
            source,
        }),
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(content)
}

// ============================================================================
// Config Builders
// ============================================================================

/// Endpoint table for the controller. Credentials are bound only when the
/// username is configured; a missing password is sent as empty.
pub fn build_endpoint_table(config: &AppConfig) -> EndpointTable {
    config
        .endpoints
        .iter()
        .map(|(identity, endpoint)| {
            let mut binding = EndpointBinding::new(&endpoint.url);
            if let Some(username) = &endpoint.username {
                binding = binding.with_auth(username, endpoint.password.as_deref().unwrap_or(""));
            }
            (identity.clone(), binding)
        })
        .collect()
}

pub fn build_settings(config: &AppConfig) -> SubmissionSettings {
    SubmissionSettings {
        redirect_target: config.redirect_target.clone(),
        redirect_delay: Duration::from_millis(config.timing.redirect_delay_ms),
        request_timeout: Duration::from_millis(config.timing.request_timeout_ms),
        block_invalid: config.validation.block_invalid,
    }
}

pub fn notification_timing(config: &AppConfig) -> (Duration, Duration) {
    (
        Duration::from_millis(config.timing.notification_display_ms),
        Duration::from_millis(config.timing.notification_exit_ms),
    )
}

/// Empty form state for `identity`, laid out as configured.
pub fn build_form(config: &AppConfig, identity: &FormIdentity) -> Option<FormState> {
    let layout = config.forms.get(identity)?;
    let fields = layout
        .fields
        .iter()
        .map(|f| FormField::new(&f.name, f.kind, f.required))
        .collect();

    Some(FormState::new(identity.clone(), fields).with_submit_label(&layout.submit_label))
}
