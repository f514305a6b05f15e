//! DingTalk robot settings tab

use crossterm::event::KeyEvent;

use super::form::{FieldValue, Form};
use crate::core::{Action, Module};

/// Values mirrored from the backend's `dingtalk` config section
#[derive(Debug, Clone, PartialEq)]
pub struct DingTalkConfigDraft {
    pub webhook_url: String,
    pub secret: String,
    pub enable_signature: bool,
    pub max_message_length: u32,
    pub enable_markdown: bool,
    pub enable_ai: bool,
}

impl Default for DingTalkConfigDraft {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            secret: String::new(),
            enable_signature: true,
            max_message_length: 4000,
            enable_markdown: true,
            enable_ai: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DingTalkConfigForm {
    form: Form,
}

impl DingTalkConfigForm {
    pub fn new(draft: DingTalkConfigDraft) -> Self {
        let form = Form::new()
            .field("webhook_url", "Webhook URL", FieldValue::text(draft.webhook_url))
            .field("secret", "Secret", FieldValue::secret(draft.secret))
            .field(
                "enable_signature",
                "Signature",
                FieldValue::Toggle(draft.enable_signature),
            )
            .field(
                "max_message_length",
                "Max Length",
                FieldValue::integer(draft.max_message_length, 500, 20_000),
            )
            .field(
                "enable_markdown",
                "Markdown",
                FieldValue::Toggle(draft.enable_markdown),
            )
            .field("enable_ai", "AI Replies", FieldValue::Toggle(draft.enable_ai));
        Self { form }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn draft(&self) -> DingTalkConfigDraft {
        DingTalkConfigDraft {
            webhook_url: self.form.text("webhook_url"),
            secret: self.form.text("secret"),
            enable_signature: self.form.toggle("enable_signature"),
            max_message_length: self.form.number("max_message_length") as u32,
            enable_markdown: self.form.toggle("enable_markdown"),
            enable_ai: self.form.toggle("enable_ai"),
        }
    }
}

impl Default for DingTalkConfigForm {
    fn default() -> Self {
        Self::new(DingTalkConfigDraft::default())
    }
}

impl Module for DingTalkConfigForm {
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

    #[test]
    fn test_toggles_and_steps_update_draft() {
        let mut form = DingTalkConfigForm::default();
        let mut press = |code| form.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        press(KeyCode::Down);
        press(KeyCode::Down);
        press(KeyCode::Char(' '));
        press(KeyCode::Down);
        press(KeyCode::Right);
        let draft = form.draft();
        assert!(!draft.enable_signature);
        assert_eq!(draft.max_message_length, 4500);
        assert!(draft.enable_markdown);
    }
}
