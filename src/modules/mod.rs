//! UI Modules
//!
//! Tabs whose state lives with their key handling implement the Module
//! trait:
//! - llm_config: LLM provider settings form
//! - dingtalk_config: DingTalk robot settings form

pub mod dingtalk_config;
pub mod form;
pub mod llm_config;

pub use dingtalk_config::{DingTalkConfigDraft, DingTalkConfigForm};
pub use form::{FieldValue, Form, FormField};
pub use llm_config::{LlmConfigDraft, LlmConfigForm};
