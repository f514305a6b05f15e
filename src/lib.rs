//! Terminal dashboard for a DingTalk bot backend: system status, MCP tools,
//! bot settings forms and a quick message test.

pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod modules;
pub mod runtime;
pub mod ui;
