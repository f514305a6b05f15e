//! Draw full frames into ratatui's TestBackend and inspect the text

use botdash::api::{SystemStatus, Tool};
use botdash::app::{App, InputMode, Tab, TestOutcome};
use botdash::modules::{LlmConfigDraft, LlmConfigForm};
use botdash::ui;
use botdash::ui::layout::tab_label;
use ratatui::backend::TestBackend;
use ratatui::style::{Color, Modifier};
use ratatui::Terminal;

/// Screen content with spaces removed, so wide glyphs compare cleanly
fn render(app: &App) -> String {
    let backend = TestBackend::new(110, 32);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|f| ui::draw(f, app)).expect("draw");
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect::<String>()
        .replace(' ', "")
}

/// Text of the tab bar cells drawn with the active-tab style
fn highlighted_tab_text(app: &App) -> String {
    let backend = TestBackend::new(110, 32);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|f| ui::draw(f, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    // row 0 is the border, the titles sit on row 1
    (0..buffer.area.width)
        .map(|x| buffer.get(x, 1))
        .filter(|cell| cell.fg == Color::Cyan && cell.modifier.contains(Modifier::BOLD))
        .map(|cell| cell.symbol())
        .collect()
}

fn app_on(tab: Tab) -> App {
    let mut app = App::new("http://127.0.0.1:8000");
    app.current_tab = tab;
    app
}

#[test]
fn test_tab_bar_and_pending_status() {
    let screen = render(&app_on(Tab::Dashboard));
    for label in ["1:Dashboard", "2:MCPTools", "3:LLM", "4:DingTalk", "5:TestTools"] {
        assert!(screen.contains(label), "missing tab {label}");
    }
    assert!(screen.contains("检查中..."));
    assert!(screen.contains("http://127.0.0.1:8000"));
}

#[test]
fn test_dashboard_status_details() {
    let mut app = app_on(Tab::Dashboard);
    app.apply_status(SystemStatus {
        healthy: true,
        mcp_client: true,
        llm_processor: false,
        dingtalk_bot: true,
        tools_count: Some(7),
        error: None,
    });
    let screen = render(&app);
    assert!(screen.contains("系统正常"));
    assert!(screen.contains("MCP在线"));
    assert!(screen.contains("LLM离线"));
    assert!(screen.contains("DingTalk在线"));
    assert!(screen.contains("Tools7"));
}

#[test]
fn test_quick_test_result_area() {
    let mut app = app_on(Tab::Dashboard);
    app.input_mode = InputMode::Message;
    app.test_message = "hello".to_string();
    app.test_outcome = TestOutcome::Loading;
    let screen = render(&app);
    assert!(screen.contains("hello"));
    assert!(screen.contains("处理中..."));

    app.test_outcome = TestOutcome::Failure("错误: 测试失败".to_string());
    assert!(render(&app).contains("错误:测试失败"));
}

#[test]
fn test_mcp_tab_placeholder_and_entries() {
    let mut app = app_on(Tab::McpConfig);
    assert!(render(&app).contains("暂无可用工具"));

    app.apply_tools(vec![
        Tool::new("search"),
        Tool::new("kubectl_get").with_description("listresources"),
    ]);
    let screen = render(&app);
    assert!(!screen.contains("暂无可用工具"));
    assert!(screen.contains("search"));
    assert!(screen.contains("暂无描述"));
    assert!(screen.contains("listresources"));
    assert!(screen.contains("MCPTOOLS(2)"));
}

#[test]
fn test_llm_form_masks_api_key() {
    let mut app = app_on(Tab::LlmConfig);
    app.llm_form = LlmConfigForm::new(LlmConfigDraft {
        api_key: "sk-secret".to_string(),
        ..LlmConfigDraft::default()
    });
    let screen = render(&app);
    assert!(!screen.contains("sk-secret"));
    assert!(screen.contains("gpt-3.5-turbo"));
    assert!(screen.contains("0.7"));
    assert!(screen.contains("2000"));
}

#[test]
fn test_test_tools_selector_prompt() {
    let mut app = app_on(Tab::TestTools);
    app.apply_tools(vec![Tool::new("search")]);
    let screen = render(&app);
    assert!(screen.contains("请选择工具..."));
    assert!(screen.contains("Notoolselected"));

    app.move_tool_selection(true);
    assert!(render(&app).contains("Toolsearch"));
}

#[test]
fn test_banner_and_help_popup() {
    let mut app = app_on(Tab::Dashboard);
    app.show_error("无法连接到后端服务");
    assert!(render(&app).contains("无法连接到后端服务"));

    app.help_open = true;
    let screen = render(&app);
    assert!(screen.contains("Help"));
    assert!(screen.contains("Navigation"));
    assert!(screen.contains("Jumptotab"));
}

#[test]
fn test_exactly_one_tab_is_highlighted() {
    let mut app = App::new("http://127.0.0.1:8000");
    assert_eq!(highlighted_tab_text(&app), tab_label(Tab::Dashboard));

    for tab in Tab::ALL {
        app.switch_tab(tab);
        assert_eq!(highlighted_tab_text(&app), tab_label(tab), "after switching to {tab}");
    }

    app.switch_tab(Tab::McpConfig);
    app.switch_tab(Tab::LlmConfig);
    let text = highlighted_tab_text(&app);
    assert_eq!(text, "3:LLM");
    assert!(!text.contains("MCP"));
}
