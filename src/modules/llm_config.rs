//! LLM settings tab

use crossterm::event::KeyEvent;

use super::form::{FieldValue, Form};
use crate::core::{Action, Module};

pub const TEMPERATURE_MIN: f64 = 0.0;
pub const TEMPERATURE_MAX: f64 = 2.0;

/// Values mirrored from the backend's `llm` config section
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfigDraft {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: u32,
}

impl Default for LlmConfigDraft {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: String::new(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfigForm {
    form: Form,
}

impl LlmConfigForm {
    pub fn new(draft: LlmConfigDraft) -> Self {
        let form = Form::new()
            .field("provider", "Provider", FieldValue::text(draft.provider))
            .field("model", "Model", FieldValue::text(draft.model))
            .field("api_key", "API Key", FieldValue::secret(draft.api_key))
            .field(
                "temperature",
                "Temperature",
                FieldValue::Number {
                    value: draft.temperature,
                    step: 0.1,
                    min: TEMPERATURE_MIN,
                    max: TEMPERATURE_MAX,
                    precision: 1,
                },
            )
            .field(
                "max_tokens",
                "Max Tokens",
                FieldValue::integer(draft.max_tokens, 100, 32_000),
            )
            .field("timeout", "Timeout (s)", FieldValue::integer(draft.timeout, 5, 600));
        Self { form }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Current slider value, shown next to the slider as it moves
    pub fn temperature(&self) -> f64 {
        self.form.number("temperature")
    }

    pub fn draft(&self) -> LlmConfigDraft {
        LlmConfigDraft {
            provider: self.form.text("provider"),
            model: self.form.text("model"),
            api_key: self.form.text("api_key"),
            temperature: self.temperature(),
            max_tokens: self.form.number("max_tokens") as u32,
            timeout: self.form.number("timeout") as u32,
        }
    }
}

impl Default for LlmConfigForm {
    fn default() -> Self {
        Self::new(LlmConfigDraft::default())
    }
}

impl Module for LlmConfigForm {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        self.form.handle_key(key)
    }

    fn captures_input(&self) -> bool {
        self.form.is_editing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(form: &mut LlmConfigForm, code: KeyCode) -> Action {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_default_draft_round_trips_through_form() {
        let form = LlmConfigForm::default();
        assert_eq!(form.draft(), LlmConfigDraft::default());
    }

    #[test]
    fn test_temperature_slider_mirrors_value() {
        let mut form = LlmConfigForm::default();
        for _ in 0..3 {
            press(&mut form, KeyCode::Down);
        }
        press(&mut form, KeyCode::Left);
        press(&mut form, KeyCode::Left);
        assert!((form.temperature() - 0.5).abs() < 1e-9);
        for _ in 0..40 {
            press(&mut form, KeyCode::Right);
        }
        assert_eq!(form.temperature(), TEMPERATURE_MAX);
    }

    #[test]
    fn test_editing_api_key_captures_input() {
        let mut form = LlmConfigForm::default();
        press(&mut form, KeyCode::Down);
        press(&mut form, KeyCode::Down);
        press(&mut form, KeyCode::Enter);
        assert!(form.captures_input());
        for ch in "sk-1".chars() {
            press(&mut form, KeyCode::Char(ch));
        }
        press(&mut form, KeyCode::Enter);
        assert!(!form.captures_input());
        assert_eq!(form.draft().api_key, "sk-1");
        assert_eq!(press(&mut form, KeyCode::Char('w')), Action::Save);
    }
}
