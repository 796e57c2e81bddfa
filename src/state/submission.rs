//! Submission lifecycle and the views derived from it
//!
//! The status region and the submit control are pure functions of
//! [`SubmissionState`], so leaving `Submitting` always restores the button.

use crate::error::SubmitError;
use chrono::{DateTime, Local};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label of the submit control when idle
pub const SUBMIT_LABEL: &str = "Submit Request";
/// Label of the submit control while a request is in flight
pub const SUBMITTING_LABEL: &str = "Submitting...";
/// Shown in place of a missing execution ARN
pub const MISSING_ARN: &str = "N/A";

/// Success body returned by the request endpoint
///
/// Fields are read leniently: a non-string scalar is kept as its JSON text and
/// an empty string counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    #[serde(default, deserialize_with = "lenient_text")]
    pub execution_arn: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

impl SubmitReceipt {
    /// The execution ARN, or the placeholder when the endpoint sent none
    pub fn arn_or_placeholder(&self) -> &str {
        self.execution_arn
            .as_deref()
            .filter(|arn| !arn.is_empty())
            .unwrap_or(MISSING_ARN)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    };
    Ok(text.filter(|s| !s.is_empty()))
}

/// Result of a finished submission
pub type Outcome = Result<SubmitReceipt, SubmitError>;

/// Where the controller is in a submit cycle
#[derive(Debug, Clone, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Done {
        outcome: Outcome,
        finished_at: DateTime<Local>,
    },
}

impl SubmissionState {
    pub fn done(outcome: Outcome) -> Self {
        Self::Done {
            outcome,
            finished_at: Local::now(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// The status region content for this state, `None` when hidden
    pub fn status(&self) -> Option<StatusMessage> {
        match self {
            Self::Idle | Self::Submitting => None,
            Self::Done { outcome, .. } => Some(status_for(outcome)),
        }
    }

    /// The submit control for this state
    pub fn submit_button(&self) -> SubmitButton {
        if self.is_submitting() {
            SubmitButton {
                label: SUBMITTING_LABEL,
                enabled: false,
            }
        } else {
            SubmitButton {
                label: SUBMIT_LABEL,
                enabled: true,
            }
        }
    }

    /// When the last submission finished
    pub fn finished_at(&self) -> Option<DateTime<Local>> {
        match self {
            Self::Done { finished_at, .. } => Some(*finished_at),
            _ => None,
        }
    }

    /// Execution ARN of the last successful submission, if any
    pub fn execution_arn(&self) -> Option<&str> {
        match self {
            Self::Done {
                outcome: Ok(receipt),
                ..
            } => receipt.execution_arn.as_deref().filter(|arn| !arn.is_empty()),
            _ => None,
        }
    }
}

/// Enabled flag and label of the submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// Status display style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Success => " Request Submitted ",
            Self::Error => " Error ",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Success => Style::default().fg(Color::Green),
            Self::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

/// Content of the status region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Build the visible status message for a given kind
pub fn render_status(kind: StatusKind, message: impl Into<String>) -> StatusMessage {
    StatusMessage {
        kind,
        text: message.into(),
    }
}

fn status_for(outcome: &Outcome) -> StatusMessage {
    match outcome {
        Ok(receipt) => {
            let mut lines = vec![
                "✅ Request submitted successfully!".to_string(),
                format!("Execution ARN: {}", receipt.arn_or_placeholder()),
            ];
            if let Some(request_id) = receipt.request_id.as_deref().filter(|id| !id.is_empty()) {
                lines.push(format!("Request ID: {request_id}"));
            }
            lines.push("An approval email has been sent to the approver.".to_string());
            render_status(StatusKind::Success, lines.join("\n"))
        }
        Err(err) => render_status(
            StatusKind::Error,
            format!("❌ Error: {err}\nPlease check your input and try again."),
        ),
    }
}
