//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// A select list; `selected` indexes into `options`
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    /// Identifier of the field, matches the wire name of the request
    pub name: &'static str,
    pub label: &'static str,
    pub value: FieldValue,
    /// Greyed-out hint shown when the field is empty
    pub placeholder: &'static str,
    pub is_required: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Text(String::new()),
            placeholder,
            is_required: false,
        }
    }

    /// Create a new required text field
    pub fn required(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            is_required: true,
            ..Self::text(name, label, placeholder)
        }
    }

    /// Create a new choice field with the given option preselected
    pub fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        selected: usize,
    ) -> Self {
        Self {
            name,
            label,
            value: FieldValue::Choice {
                options,
                selected: selected.min(options.len().saturating_sub(1)),
            },
            placeholder: "",
            is_required: true,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }

    /// Get the raw value exactly as entered (or the selected option)
    pub fn raw_value(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => options.get(*selected).copied().unwrap_or(""),
        }
    }

    /// Set the text value (ignored for choice fields)
    #[cfg(test)]
    pub fn set_text(&mut self, value: impl Into<String>) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value.into();
        }
    }

    /// Select the option with the given value; returns false if it isn't offered
    #[cfg(test)]
    pub fn select(&mut self, value: &str) -> bool {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if let Some(index) = options.iter().position(|o| *o == value) {
                *selected = index;
                return true;
            }
        }
        false
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Move to the next option, wrapping around
    pub fn next_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if !options.is_empty() {
                *selected = (*selected + 1) % options.len();
            }
        }
    }

    /// Move to the previous option, wrapping around
    pub fn prev_choice(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if !options.is_empty() {
                *selected = if *selected == 0 {
                    options.len() - 1
                } else {
                    *selected - 1
                };
            }
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { .. } => format!("◀ {} ▶", self.raw_value()),
        }
    }
}
