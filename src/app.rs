use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::api::{SystemStatus, Tool};
use crate::core::{Action, Command, Module};
use crate::modules::{DingTalkConfigForm, LlmConfigForm};
use crate::runtime::{RuntimeCommand, RuntimeEvent};

/// Banners disappear this long after they were shown
pub const BANNER_TTL: Duration = Duration::from_secs(3);

pub const MSG_BACKEND_UNREACHABLE: &str = "无法连接到后端服务";
pub const MSG_TOOLS_FAILED: &str = "加载工具列表失败";
pub const MSG_EMPTY_TEST_MESSAGE: &str = "请输入测试消息";
pub const MSG_TEST_DEFAULT_SUCCESS: &str = "测试成功";
pub const MSG_LLM_SAVED: &str = "LLM配置保存成功";
pub const MSG_DINGTALK_SAVED: &str = "钉钉配置保存成功";
pub const MSG_TOOL_TESTED: &str = "工具测试完成";

/// Main tabs in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    McpConfig,
    LlmConfig,
    DingTalkConfig,
    TestTools,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::McpConfig,
        Tab::LlmConfig,
        Tab::DingTalkConfig,
        Tab::TestTools,
    ];

    /// Stable identifier, used by `:tab <name>`
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::McpConfig => "mcp-config",
            Tab::LlmConfig => "llm-config",
            Tab::DingTalkConfig => "dingtalk-config",
            Tab::TestTools => "test-tools",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::McpConfig => "MCP Tools",
            Tab::LlmConfig => "LLM",
            Tab::DingTalkConfig => "DingTalk",
            Tab::TestTools => "Test Tools",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Dashboard => '1',
            Tab::McpConfig => '2',
            Tab::LlmConfig => '3',
            Tab::DingTalkConfig => '4',
            Tab::TestTools => '5',
        }
    }

    pub fn from_shortcut(ch: char) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.shortcut() == ch)
    }

    /// Loader run every time the tab becomes active
    pub fn loader(&self) -> Loader {
        match self {
            Tab::Dashboard => Loader::SystemStatus,
            Tab::McpConfig | Tab::TestTools => Loader::Tools,
            Tab::LlmConfig => Loader::LlmConfig,
            Tab::DingTalkConfig => Loader::DingTalkConfig,
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tab: {0}")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.name() == s)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    SystemStatus,
    Tools,
    /// Placeholder: the LLM form is not loaded from the backend
    LlmConfig,
    /// Placeholder: the DingTalk form is not loaded from the backend
    DingTalkConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    /// Typing into the quick test message field
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub text: String,
    pub deadline: Instant,
}

impl Banner {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// Content of the quick test result area
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestOutcome {
    #[default]
    Idle,
    Loading,
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone, Default)]
pub struct CommandBar {
    pub input: String,
}

/// Dashboard controller: owns all UI state and turns user intent into
/// backend requests. Requests are queued and picked up by the event loop
/// through [`App::take_commands`].
#[derive(Debug)]
pub struct App {
    pub api_base: String,
    pub current_tab: Tab,
    pub system_status: Option<SystemStatus>,
    pub status_checked_at: Option<DateTime<Local>>,
    pub tools: Vec<Tool>,
    /// Highlighted row in the MCP tools list
    pub tool_cursor: usize,
    /// Test tools selector; 0 is the "choose a tool" prompt
    pub tool_selection: usize,
    pub test_message: String,
    pub test_outcome: TestOutcome,
    pub banners: Vec<Banner>,
    pub llm_form: LlmConfigForm,
    pub dingtalk_form: DingTalkConfigForm,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub help_open: bool,
    pub should_quit: bool,
    next_banner_id: u64,
    outbox: Vec<RuntimeCommand>,
}

impl App {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            current_tab: Tab::Dashboard,
            system_status: None,
            status_checked_at: None,
            tools: Vec::new(),
            tool_cursor: 0,
            tool_selection: 0,
            test_message: String::new(),
            test_outcome: TestOutcome::Idle,
            banners: Vec::new(),
            llm_form: LlmConfigForm::default(),
            dingtalk_form: DingTalkConfigForm::default(),
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            help_open: false,
            should_quit: false,
            next_banner_id: 1,
            outbox: Vec::new(),
        }
    }

    /// Initial data load: a status check followed by a dashboard refresh
    pub fn init(&mut self) {
        self.check_system_status();
        self.load_tab_data(Tab::Dashboard);
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        tracing::debug!(from = %self.current_tab, to = %tab, "switch tab");
        self.current_tab = tab;
        self.load_tab_data(tab);
    }

    /// `:tab <name>` entry point; unknown names are reported, not applied
    pub fn switch_tab_named(&mut self, name: &str) -> Result<(), UnknownTab> {
        let tab = name.parse::<Tab>()?;
        self.switch_tab(tab);
        Ok(())
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        let index = self.current_tab.index();
        let len = Tab::ALL.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.switch_tab(Tab::ALL[next]);
    }

    pub fn load_tab_data(&mut self, tab: Tab) {
        match tab.loader() {
            Loader::SystemStatus => self.check_system_status(),
            Loader::Tools => self.load_tools(),
            Loader::LlmConfig => tracing::debug!("加载LLM配置"),
            Loader::DingTalkConfig => tracing::debug!("加载钉钉配置"),
        }
    }

    /// Like [`App::load_tab_data`] but ignores names that are not tabs
    pub fn load_tab_data_named(&mut self, name: &str) {
        if let Ok(tab) = name.parse::<Tab>() {
            self.load_tab_data(tab);
        }
    }

    pub fn check_system_status(&mut self) {
        self.outbox.push(RuntimeCommand::CheckStatus);
    }

    pub fn apply_status(&mut self, status: SystemStatus) {
        self.system_status = Some(status);
        self.status_checked_at = Some(Local::now());
    }

    pub fn apply_status_error(&mut self, message: &str) {
        tracing::error!(error = %message, "检查系统状态失败");
        self.show_error(MSG_BACKEND_UNREACHABLE);
    }

    pub fn load_tools(&mut self) {
        self.outbox.push(RuntimeCommand::LoadTools);
    }

    pub fn apply_tools(&mut self, tools: Vec<Tool>) {
        self.tools = tools;
        self.tool_cursor = self.tool_cursor.min(self.tools.len().saturating_sub(1));
        // the selector is rebuilt, so it falls back to its prompt option
        self.tool_selection = 0;
    }

    pub fn apply_tools_error(&mut self, message: &str) {
        tracing::error!(error = %message, "加载工具列表失败");
        self.show_error(MSG_TOOLS_FAILED);
    }

    /// Submit the message field. Blank input is rejected locally.
    pub fn quick_test(&mut self) {
        let message = self.test_message.trim();
        if message.is_empty() {
            self.show_error(MSG_EMPTY_TEST_MESSAGE);
            return;
        }
        let message = message.to_string();
        self.test_outcome = TestOutcome::Loading;
        self.outbox.push(RuntimeCommand::QuickTest { message });
    }

    pub fn apply_test_success(&mut self, response: Option<String>) {
        let text = response
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| MSG_TEST_DEFAULT_SUCCESS.to_string());
        self.test_outcome = TestOutcome::Success(text);
    }

    pub fn apply_test_failure(&mut self, message: &str) {
        tracing::error!(error = %message, "快速测试失败");
        self.test_outcome = TestOutcome::Failure(format!("错误: {message}"));
    }

    pub fn apply_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::StatusReady(status) => self.apply_status(status),
            RuntimeEvent::StatusFailed { message } => self.apply_status_error(&message),
            RuntimeEvent::ToolsReady(tools) => self.apply_tools(tools),
            RuntimeEvent::ToolsFailed { message } => self.apply_tools_error(&message),
            RuntimeEvent::TestSucceeded { response } => self.apply_test_success(response),
            RuntimeEvent::TestFailed { message } => self.apply_test_failure(&message),
        }
    }

    /// Drain queued backend requests
    pub fn take_commands(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn show_error(&mut self, text: impl Into<String>) -> u64 {
        self.push_banner(BannerKind::Error, text.into(), Instant::now())
    }

    pub fn show_success(&mut self, text: impl Into<String>) -> u64 {
        self.push_banner(BannerKind::Success, text.into(), Instant::now())
    }

    /// Add a banner shown from `now` until `now + BANNER_TTL`
    pub fn push_banner(&mut self, kind: BannerKind, text: String, now: Instant) -> u64 {
        let id = self.next_banner_id;
        self.next_banner_id += 1;
        self.banners.push(Banner {
            id,
            kind,
            text,
            deadline: now + BANNER_TTL,
        });
        id
    }

    /// Cancel a banner before its timer fires
    pub fn dismiss_banner(&mut self, id: u64) -> bool {
        let before = self.banners.len();
        self.banners.retain(|banner| banner.id != id);
        self.banners.len() != before
    }

    pub fn expire_banners(&mut self, now: Instant) {
        self.banners.retain(|banner| !banner.is_expired(now));
    }

    pub fn on_tick(&mut self) {
        self.expire_banners(Instant::now());
    }

    pub fn save_llm_config(&mut self) {
        let draft = self.llm_form.draft();
        tracing::info!(
            provider = %draft.provider,
            model = %draft.model,
            temperature = draft.temperature,
            "LLM config saved locally; not sent to backend"
        );
        self.show_success(MSG_LLM_SAVED);
    }

    pub fn save_dingtalk_config(&mut self) {
        let draft = self.dingtalk_form.draft();
        tracing::info!(
            webhook_set = !draft.webhook_url.is_empty(),
            enable_ai = draft.enable_ai,
            "DingTalk config saved locally; not sent to backend"
        );
        self.show_success(MSG_DINGTALK_SAVED);
    }

    /// Per-tool test action; placeholder that does not call the backend
    pub fn test_specific_tool(&mut self, name: &str) {
        tracing::info!(tool = %name, "tool test requested");
        self.show_success(MSG_TOOL_TESTED);
    }

    /// Test action of the test tools tab; placeholder like the per-tool one
    pub fn test_tool(&mut self) {
        let selected = self.selected_tool().map(|tool| tool.name.clone());
        tracing::info!(tool = ?selected, "tool test requested");
        self.show_success(MSG_TOOL_TESTED);
    }

    /// Tool picked in the test tools selector, `None` on the prompt option
    pub fn selected_tool(&self) -> Option<&Tool> {
        self.tool_selection
            .checked_sub(1)
            .and_then(|index| self.tools.get(index))
    }

    pub fn tool_under_cursor(&self) -> Option<&Tool> {
        self.tools.get(self.tool_cursor)
    }

    pub fn move_tool_cursor(&mut self, forward: bool) {
        if self.tools.is_empty() {
            return;
        }
        self.tool_cursor = if forward {
            (self.tool_cursor + 1).min(self.tools.len() - 1)
        } else {
            self.tool_cursor.saturating_sub(1)
        };
    }

    /// Move through the selector options: the prompt plus one per tool
    pub fn move_tool_selection(&mut self, forward: bool) {
        let options = self.tools.len() + 1;
        self.tool_selection = if forward {
            (self.tool_selection + 1).min(options - 1)
        } else {
            self.tool_selection.saturating_sub(1)
        };
    }

    /// Config form on the current tab, if it has one
    pub fn active_module(&mut self) -> Option<&mut dyn Module> {
        match self.current_tab {
            Tab::LlmConfig => Some(&mut self.llm_form),
            Tab::DingTalkConfig => Some(&mut self.dingtalk_form),
            _ => None,
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Save => self.save_current_form(),
        }
    }

    fn save_current_form(&mut self) {
        match self.current_tab {
            Tab::LlmConfig => self.save_llm_config(),
            Tab::DingTalkConfig => self.save_dingtalk_config(),
            other => {
                self.show_error(format!("{} 没有可保存的配置", other.title()));
            }
        }
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = std::mem::take(&mut self.command.input);
        self.input_mode = InputMode::Normal;
        if input.trim().is_empty() {
            return;
        }
        let cmd = crate::core::parse_command(&input);
        self.execute_command(cmd);
    }

    pub fn execute_command(&mut self, cmd: Command) {
        match cmd {
            Command::Tab(name) => {
                if let Err(err) = self.switch_tab_named(&name) {
                    self.show_error(err.to_string());
                }
            }
            Command::Refresh => self.check_system_status(),
            Command::Tools => self.load_tools(),
            Command::Test(message) => {
                if let Some(message) = message {
                    self.test_message = message;
                }
                self.quick_test();
            }
            Command::Save => self.save_current_form(),
            Command::Help => self.help_open = true,
            Command::Quit => self.should_quit = true,
            Command::Unknown(input) => {
                self.show_error(format!("Unknown command: {input}"));
            }
        }
    }

    pub fn enter_message_input(&mut self) {
        self.input_mode = InputMode::Message;
    }

    pub fn exit_message_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_names_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(tab.name().parse::<Tab>(), Ok(tab));
            assert_eq!(Tab::from_shortcut(tab.shortcut()), Some(tab));
        }
        assert_eq!(
            "settings".parse::<Tab>(),
            Err(UnknownTab("settings".to_string()))
        );
    }

    #[test]
    fn test_loader_mapping() {
        assert_eq!(Tab::Dashboard.loader(), Loader::SystemStatus);
        assert_eq!(Tab::McpConfig.loader(), Loader::Tools);
        assert_eq!(Tab::TestTools.loader(), Loader::Tools);
        assert_eq!(Tab::LlmConfig.loader(), Loader::LlmConfig);
        assert_eq!(Tab::DingTalkConfig.loader(), Loader::DingTalkConfig);
    }

    #[test]
    fn test_cycle_tab_wraps() {
        let mut app = App::new("");
        app.cycle_tab(false);
        assert_eq!(app.current_tab, Tab::TestTools);
        app.cycle_tab(true);
        assert_eq!(app.current_tab, Tab::Dashboard);
    }

    #[test]
    fn test_selector_walks_prompt_then_tools() {
        let mut app = App::new("");
        app.move_tool_selection(true);
        assert_eq!(app.tool_selection, 0);
        app.apply_tools(vec![Tool::new("a"), Tool::new("b")]);
        app.move_tool_selection(true);
        app.move_tool_selection(true);
        app.move_tool_selection(true);
        assert_eq!(app.selected_tool().map(|t| t.name.as_str()), Some("b"));
        app.apply_tools(vec![Tool::new("c")]);
        assert_eq!(app.selected_tool(), None);
    }

    #[test]
    fn test_dismiss_banner_cancels_timer() {
        let mut app = App::new("");
        let first = app.show_error("one");
        app.show_success("two");
        assert!(app.dismiss_banner(first));
        assert!(!app.dismiss_banner(first));
        assert_eq!(app.banners.len(), 1);
        assert_eq!(app.banners[0].text, "two");
    }
}
