//! Form state management for the instance request form

use super::field::FormField;
use crate::state::request::{fields, InstanceType};

/// Number of editable fields (the buttons row comes after them)
pub const FIELD_COUNT: usize = 10;

/// Buttons on the action row, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    #[default]
    Submit,
    Clear,
}

impl FormButton {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Submit => Self::Clear,
            Self::Clear => Self::Submit,
        }
    }
}

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// The EC2 instance request form
#[derive(Debug, Clone)]
pub struct RequestForm {
    fields: Vec<FormField>,
    default_instance_type: InstanceType,
    pub active_field_index: usize,
    pub selected_button: FormButton,
}

impl RequestForm {
    pub fn new() -> Self {
        Self::with_default_instance_type(InstanceType::default())
    }

    pub fn with_default_instance_type(instance_type: InstanceType) -> Self {
        Self {
            fields: build_fields(instance_type),
            default_instance_type: instance_type,
            active_field_index: 0,
            selected_button: FormButton::default(),
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == FIELD_COUNT
    }

    /// All editable fields in display order
    #[cfg(test)]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Raw value of a field by identifier; unknown identifiers read as empty
    pub fn raw(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(FormField::raw_value)
            .unwrap_or("")
    }

    /// Set a field by identifier; text fields take the value verbatim and
    /// choice fields select the matching option
    #[cfg(test)]
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            if field.is_choice() {
                field.select(value);
            } else {
                field.set_text(value);
            }
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.get_active_field_mut() {
            field.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.pop_char();
        }
    }

    pub fn next_choice(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.next_choice();
        }
    }

    pub fn prev_choice(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.prev_choice();
        }
    }

    pub fn toggle_button(&mut self) {
        self.selected_button = self.selected_button.toggle();
    }

    /// Restore every field to its default value and move back to the top
    pub fn reset(&mut self) {
        self.fields = build_fields(self.default_instance_type);
        self.active_field_index = 0;
        self.selected_button = FormButton::default();
    }
}

impl Default for RequestForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RequestForm {
    fn field_count(&self) -> usize {
        FIELD_COUNT + 1 // fields, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(FIELD_COUNT);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        // Buttons row has no FormField
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

fn build_fields(instance_type: InstanceType) -> Vec<FormField> {
    vec![
        FormField::required(fields::REQUESTER_EMAIL, "Requester Email", "you@example.com"),
        FormField::required(fields::APPROVER_EMAIL, "Approver Email", "approver@example.com"),
        FormField::required(fields::INSTANCE_NAME, "Instance Name", "my-instance"),
        FormField::choice(
            fields::INSTANCE_TYPE,
            "Instance Type",
            InstanceType::OPTIONS,
            instance_type.option_index(),
        ),
        FormField::text(fields::EBS_VOLUME_SIZE, "EBS Volume Size (GiB)", "AMI default"),
        FormField::text(fields::EBS_VOLUME_TYPE, "EBS Volume Type", "gp3"),
        FormField::text(fields::PRIVATE_IP_ADDRESS, "Private IP Address", "auto-assign"),
        FormField::required(fields::SUBNET_ID, "Subnet ID", "subnet-..."),
        FormField::required(
            fields::SECURITY_GROUP_IDS,
            "Security Group IDs (comma-separated)",
            "sg-..., sg-...",
        ),
        FormField::text(fields::AMI_ID, "AMI ID", "default AMI"),
    ]
}
