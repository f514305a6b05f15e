//! Generic field list used by the config tabs

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text {
        value: String,
        /// Rendered masked, e.g. API keys
        secret: bool,
    },
    Number {
        value: f64,
        step: f64,
        min: f64,
        max: f64,
        /// Decimal places kept after each step
        precision: u32,
    },
    Toggle(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text {
            value: value.into(),
            secret: false,
        }
    }

    pub fn secret(value: impl Into<String>) -> Self {
        FieldValue::Text {
            value: value.into(),
            secret: true,
        }
    }

    pub fn integer(value: u32, step: u32, max: u32) -> Self {
        FieldValue::Number {
            value: f64::from(value),
            step: f64::from(step),
            min: f64::from(step),
            max: f64::from(max),
            precision: 0,
        }
    }

    /// Text shown in the form
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text { value, secret: true } if !value.is_empty() => {
                "•".repeat(value.chars().count().min(24))
            }
            FieldValue::Text { value, .. } => value.clone(),
            FieldValue::Number {
                value, precision, ..
            } => format!("{:.*}", *precision as usize, value),
            FieldValue::Toggle(true) => "[x]".to_string(),
            FieldValue::Toggle(false) => "[ ]".to_string(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FieldValue::Text { .. })
    }

    fn step(&mut self, forward: bool) {
        if let FieldValue::Number {
            value,
            step,
            min,
            max,
            precision,
        } = self
        {
            let next = if forward { *value + *step } else { *value - *step };
            let scale = 10f64.powi(*precision as i32);
            *value = ((next * scale).round() / scale).clamp(*min, *max);
        }
    }

    fn toggle(&mut self) {
        if let FieldValue::Toggle(on) = self {
            *on = !*on;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: FieldValue,
}

/// Ordered fields with a cursor and an inline text editor
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<FormField>,
    cursor: usize,
    editing: bool,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &'static str, label: &'static str, value: FieldValue) -> Self {
        self.fields.push(FormField { key, label, value });
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    pub fn text(&self, key: &str) -> String {
        match self.get(key) {
            Some(FieldValue::Text { value, .. }) => value.clone(),
            _ => String::new(),
        }
    }

    pub fn number(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(FieldValue::Number { value, .. }) => *value,
            _ => 0.0,
        }
    }

    pub fn toggle(&self, key: &str) -> bool {
        matches!(self.get(key), Some(FieldValue::Toggle(true)))
    }

    fn current_mut(&mut self) -> Option<&mut FieldValue> {
        self.fields.get_mut(self.cursor).map(|f| &mut f.value)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.editing {
            self.handle_edit_key(key);
            return Action::None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.fields.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(value) = self.current_mut() {
                    value.step(false);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(value) = self.current_mut() {
                    value.step(true);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(value) = self.current_mut() {
                    value.toggle();
                }
            }
            KeyCode::Enter => match self.current_mut() {
                Some(value) if value.is_text() => self.editing = true,
                Some(value) => value.toggle(),
                None => {}
            },
            KeyCode::Char('w') => return Action::Save,
            _ => {}
        }
        Action::None
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.editing = false,
            KeyCode::Backspace => {
                if let Some(FieldValue::Text { value, .. }) = self.current_mut() {
                    value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                if let Some(FieldValue::Text { value, .. }) = self.current_mut() {
                    value.push(ch);
                }
            }
            _ => {}
        }
    }
}
