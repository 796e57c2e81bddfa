//! Application state and key handling

use crate::api::{RequestClient, RequestSubmitter};
use crate::config::RequestConfig;
use crate::controller::SubmissionController;
use crate::state::{Form, FormButton, RequestForm, SubmissionState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// The instance request form
    pub form: RequestForm,
    /// Drives submissions and owns the status region
    pub controller: SubmissionController,
    /// Endpoint requests are posted to, shown in the header
    pub endpoint: String,
    /// Whether the app should quit
    quit: bool,
    /// Copy feedback message
    pub copy_message: Option<String>,
}

impl App {
    /// Create a new App from the user configuration
    pub fn new(config: &RequestConfig) -> Result<Self> {
        let endpoint = config.resolve_endpoint();
        let client = RequestClient::new(&endpoint)?;
        tracing::info!(endpoint = client.endpoint(), "Using request endpoint");

        Ok(Self::with_submitter(
            Arc::new(client),
            RequestForm::with_default_instance_type(config.instance_type()),
            endpoint,
        ))
    }

    pub fn with_submitter(
        submitter: Arc<dyn RequestSubmitter>,
        form: RequestForm,
        endpoint: String,
    ) -> Self {
        Self {
            form,
            controller: SubmissionController::new(submitter),
            endpoint,
            quit: false,
            copy_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn submission(&self) -> &SubmissionState {
        self.controller.state()
    }

    /// Called once per event loop tick
    pub fn tick(&mut self) {
        self.controller.poll();
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let on_buttons_row = self.form.is_buttons_row_active();
        let on_choice = self
            .form
            .get_field(self.form.active_field())
            .is_some_and(|f| f.is_choice());

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                self.copy_execution_arn()
            }
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Left | KeyCode::Right if on_buttons_row => self.form.toggle_button(),
            KeyCode::Right if on_choice => self.form.next_choice(),
            KeyCode::Left if on_choice => self.form.prev_choice(),
            // Enter on the buttons row triggers the selected button
            KeyCode::Enter if on_buttons_row => match self.form.selected_button {
                FormButton::Submit => self.submit(),
                FormButton::Clear => self.reset(),
            },
            KeyCode::Enter => self.form.next_field(),
            KeyCode::Char(c) if !ctrl && !on_buttons_row => self.form.input_char(c),
            KeyCode::Backspace if !on_buttons_row => self.form.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Submit event
    fn submit(&mut self) {
        self.copy_message = None;
        self.controller.handle_submit(&self.form);
    }

    /// Reset event: the form restores its defaults and the status region clears
    fn reset(&mut self) {
        self.copy_message = None;
        self.form.reset();
        self.controller.handle_reset();
    }

    fn copy_execution_arn(&mut self) {
        let Some(arn) = self.submission().execution_arn().map(String::from) else {
            self.copy_message = Some("No execution ARN to copy".to_string());
            return;
        };

        self.copy_message = Some(match copy_to_clipboard(&arn) {
            Ok(()) => "Execution ARN copied".to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to copy execution ARN");
                format!("Copy failed: {err}")
            }
        });
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
