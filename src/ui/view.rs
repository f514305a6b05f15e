//! Render-ready values derived from controller state.
//!
//! Kept free of ratatui types so the display rules can be checked without
//! drawing a frame.

use crate::api::{SystemStatus, Tool};

pub const LABEL_ONLINE: &str = "在线";
pub const LABEL_OFFLINE: &str = "离线";
pub const STATUS_HEALTHY: &str = "系统正常";
pub const STATUS_UNHEALTHY: &str = "系统异常";
pub const STATUS_PENDING: &str = "检查中...";
pub const TOOLS_EMPTY: &str = "暂无可用工具";
pub const TOOL_NO_DESCRIPTION: &str = "暂无描述";
pub const SELECT_PROMPT: &str = "请选择工具...";
pub const TEST_LOADING: &str = "处理中...";

pub fn online_label(online: bool) -> &'static str {
    if online {
        LABEL_ONLINE
    } else {
        LABEL_OFFLINE
    }
}

/// Dot + text in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndicator {
    pub online: bool,
    pub text: &'static str,
}

impl StatusIndicator {
    pub fn from_status(status: Option<&SystemStatus>) -> Self {
        match status {
            Some(status) if status.healthy => Self {
                online: true,
                text: STATUS_HEALTHY,
            },
            Some(_) => Self {
                online: false,
                text: STATUS_UNHEALTHY,
            },
            None => Self {
                online: false,
                text: STATUS_PENDING,
            },
        }
    }
}

/// Detail fields of the dashboard status panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDetails {
    pub mcp: &'static str,
    pub llm: &'static str,
    pub dingtalk: &'static str,
    pub tools_count: String,
}

impl StatusDetails {
    pub fn from_status(status: &SystemStatus) -> Self {
        Self {
            mcp: online_label(status.mcp_client),
            llm: online_label(status.llm_processor),
            dingtalk: online_label(status.dingtalk_bot),
            tools_count: status.tools_count().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEntry<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub usage_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolListView<'a> {
    /// Placeholder instead of an empty list
    Empty,
    Entries(Vec<ToolEntry<'a>>),
}

impl<'a> ToolListView<'a> {
    pub fn from_tools(tools: &'a [Tool]) -> Self {
        if tools.is_empty() {
            return ToolListView::Empty;
        }
        ToolListView::Entries(
            tools
                .iter()
                .map(|tool| ToolEntry {
                    name: &tool.name,
                    description: tool.description().unwrap_or(TOOL_NO_DESCRIPTION),
                    usage_count: tool.usage_count,
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Options of the test tools selector: the prompt, then one per tool
pub fn tool_selector_options(tools: &[Tool]) -> Vec<SelectOption> {
    let mut options = Vec::with_capacity(tools.len() + 1);
    options.push(SelectOption {
        value: String::new(),
        label: SELECT_PROMPT.to_string(),
    });
    options.extend(tools.iter().map(|tool| SelectOption {
        value: tool.name.clone(),
        label: tool.name.clone(),
    }));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_pending_before_first_status() {
        let indicator = StatusIndicator::from_status(None);
        assert!(!indicator.online);
        assert_eq!(indicator.text, STATUS_PENDING);
    }

    #[test]
    fn test_unhealthy_status() {
        let status = SystemStatus {
            healthy: false,
            ..SystemStatus::default()
        };
        let indicator = StatusIndicator::from_status(Some(&status));
        assert_eq!(indicator.text, STATUS_UNHEALTHY);
        let details = StatusDetails::from_status(&status);
        assert_eq!(details.mcp, LABEL_OFFLINE);
        assert_eq!(details.tools_count, "0");
    }

    #[test]
    fn test_usage_count_is_carried() {
        let mut tool = Tool::new("kubectl_get").with_description("get resources");
        tool.usage_count = Some(4);
        let tools = vec![tool];
        match ToolListView::from_tools(&tools) {
            ToolListView::Entries(entries) => {
                assert_eq!(entries[0].usage_count, Some(4));
                assert_eq!(entries[0].description, "get resources");
            }
            ToolListView::Empty => panic!("expected entries"),
        }
    }
}
