//! Tab-based UI rendering

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs as RataTabs, Wrap};
use ratatui::Frame;

use super::layout::{tab_label, TAB_DIVIDER};
use super::view::{
    tool_selector_options, StatusDetails, StatusIndicator, ToolListView, TEST_LOADING,
    TOOLS_EMPTY,
};
use crate::app::{App, InputMode, Tab, TestOutcome};
use crate::modules::llm_config::{TEMPERATURE_MAX, TEMPERATURE_MIN};
use crate::modules::{FieldValue, Form};

/// Draw the tab bar at the top
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let label = tab_label(*tab);
            let (shortcut, title) = label.split_at(2);
            Line::from(vec![
                Span::styled(shortcut.to_string(), Style::default().fg(Color::DarkGray)),
                Span::raw(title.to_string()),
            ])
        })
        .collect();

    let selected = Tab::ALL.iter().position(|t| *t == app.current_tab).unwrap_or(0);

    let indicator = StatusIndicator::from_status(app.system_status.as_ref());
    let dot_color = if indicator.online {
        Color::Green
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(vec![
            Span::styled(
                " botdash ",
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("● ", Style::default().fg(dot_color)),
            Span::raw(format!("{} ", indicator.text)),
        ]));

    let tabs = RataTabs::new(titles)
        .block(block)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(TAB_DIVIDER);

    f.render_widget(tabs, area);
}

pub fn draw_tab(f: &mut Frame, area: Rect, app: &App) {
    match app.current_tab {
        Tab::Dashboard => draw_dashboard_tab(f, area, app),
        Tab::McpConfig => draw_mcp_tab(f, area, app),
        Tab::LlmConfig => draw_llm_tab(f, area, app),
        Tab::DingTalkConfig => draw_dingtalk_tab(f, area, app),
        Tab::TestTools => draw_test_tools_tab(f, area, app),
    }
}

/// Draw the Dashboard tab: status panel on top, quick test below
pub fn draw_dashboard_tab(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Status
            Constraint::Length(3), // Message input
            Constraint::Min(3),    // Result
        ])
        .split(area);

    draw_status_panel(f, chunks[0], app);
    draw_message_input(f, chunks[1], app);
    draw_test_result(f, chunks[2], app);
}

fn draw_status_panel(f: &mut Frame, area: Rect, app: &App) {
    let indicator = StatusIndicator::from_status(app.system_status.as_ref());
    let (dot_color, text_color) = if indicator.online {
        (Color::Green, Color::LightGreen)
    } else {
        (Color::DarkGray, Color::LightRed)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(" ● ", Style::default().fg(dot_color)),
        Span::styled(indicator.text, Style::default().fg(text_color)),
        Span::styled("   API ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.api_base.clone(), Style::default().fg(Color::Cyan)),
    ])];

    if let Some(status) = app.system_status.as_ref() {
        let details = StatusDetails::from_status(status);
        let detail = |label: &'static str, value: &str| {
            let color = if value == super::view::LABEL_ONLINE {
                Color::Green
            } else {
                Color::Yellow
            };
            Line::from(vec![
                Span::styled(format!("   {label:<10}"), Style::default().fg(Color::DarkGray)),
                Span::styled(value.to_string(), Style::default().fg(color)),
            ])
        };
        lines.push(Line::from(""));
        lines.push(detail("MCP", details.mcp));
        lines.push(detail("LLM", details.llm));
        lines.push(detail("DingTalk", details.dingtalk));
        lines.push(Line::from(vec![
            Span::styled(format!("   {:<10}", "Tools"), Style::default().fg(Color::DarkGray)),
            Span::styled(details.tools_count, Style::default().fg(Color::White)),
        ]));
        if let Some(error) = status.error.as_deref() {
            lines.push(Line::from(Span::styled(
                format!("   {error}"),
                Style::default().fg(Color::LightRed),
            )));
        }
    }

    let title = match app.status_checked_at {
        Some(at) => format!("STATUS · {}", at.format("%H:%M:%S")),
        None => "STATUS".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_message_input(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Message;
    let border = if editing { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title("QUICK TEST - Message");

    let content = if app.test_message.is_empty() && !editing {
        Line::from(Span::styled(
            " Press i to type a message, Enter to send...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(format!(" {}", app.test_message))];
        if editing {
            spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn draw_test_result(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Result");

    let line = match &app.test_outcome {
        TestOutcome::Idle => Line::from(Span::styled(
            " (no output)",
            Style::default().fg(Color::DarkGray),
        )),
        TestOutcome::Loading => Line::from(Span::styled(
            format!(" ⟳ {TEST_LOADING}"),
            Style::default().fg(Color::Yellow),
        )),
        TestOutcome::Success(text) => {
            Line::from(Span::styled(format!(" {text}"), Style::default().fg(Color::Green)))
        }
        TestOutcome::Failure(text) => {
            Line::from(Span::styled(format!(" {text}"), Style::default().fg(Color::LightRed)))
        }
    };

    let paragraph = Paragraph::new(line)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Draw the MCP tab: every tool with its description and a test action
pub fn draw_mcp_tab(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!("MCP TOOLS ({})", app.tools.len()));

    match ToolListView::from_tools(&app.tools) {
        ToolListView::Empty => {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                format!(" {TOOLS_EMPTY}"),
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(placeholder, area);
        }
        ToolListView::Entries(entries) => {
            let items: Vec<ListItem> = entries
                .iter()
                .map(|entry| {
                    let mut header = vec![
                        Span::styled(
                            entry.name.to_string(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  "),
                        Span::styled("[▶ 测试]", Style::default().fg(Color::LightCyan)),
                    ];
                    if let Some(count) = entry.usage_count {
                        header.push(Span::styled(
                            format!("  used {count}×"),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    ListItem::new(vec![
                        Line::from(header),
                        Line::from(Span::styled(
                            format!("  {}", entry.description),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ])
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("▸ ");
            let mut state = ListState::default();
            state.select(Some(app.tool_cursor));
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}

pub fn draw_llm_tab(f: &mut Frame, area: Rect, app: &App) {
    let temperature = app.llm_form.temperature();
    draw_form(f, area, "LLM CONFIG", app.llm_form.form(), |key| {
        (key == "temperature").then(|| slider(temperature, TEMPERATURE_MIN, TEMPERATURE_MAX, 20))
    });
}

pub fn draw_dingtalk_tab(f: &mut Frame, area: Rect, app: &App) {
    draw_form(f, area, "DINGTALK CONFIG", app.dingtalk_form.form(), |_| None);
}

fn slider(value: f64, min: f64, max: f64, width: usize) -> String {
    let ratio = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!(
        "{}●{}",
        "━".repeat(filled),
        "─".repeat(width.saturating_sub(filled))
    )
}

fn draw_form<F>(f: &mut Frame, area: Rect, title: &str, form: &Form, extra: F)
where
    F: Fn(&str) -> Option<String>,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let mut lines = vec![Line::from("")];
    for (index, field) in form.fields().iter().enumerate() {
        let selected = index == form.cursor();
        let editing = selected && form.is_editing();
        let label_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = match field.value {
            FieldValue::Toggle(true) => Style::default().fg(Color::Green),
            FieldValue::Toggle(false) => Style::default().fg(Color::DarkGray),
            _ if editing => Style::default().fg(Color::Cyan),
            _ => Style::default().fg(Color::White),
        };
        let prefix = if selected { "▸" } else { " " };
        let mut spans = vec![
            Span::styled(format!(" {prefix} {:<14}", field.label), label_style),
            Span::styled(field.value.display(), value_style),
        ];
        if editing {
            spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        }
        if let Some(extra) = extra(field.key) {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(extra, Style::default().fg(Color::Cyan)));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title.to_string());
    f.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let hints = Line::from(vec![
        Span::styled(" ↑↓", Style::default().fg(Color::Yellow)),
        Span::raw(" field  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" edit  "),
        Span::styled("←→", Style::default().fg(Color::Yellow)),
        Span::raw(" adjust  "),
        Span::styled("Space", Style::default().fg(Color::Yellow)),
        Span::raw(" toggle  "),
        Span::styled("w", Style::default().fg(Color::Yellow)),
        Span::raw(" save"),
    ]);
    let hint_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(hints).block(hint_block), chunks[1]);
}

/// Draw the Test Tools tab: tool selector plus the run action
pub fn draw_test_tools_tab(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = tool_selector_options(&app.tools)
        .into_iter()
        .map(|option| {
            let style = if option.value.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(option.label, style)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("SELECT TOOL"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");
    let mut state = ListState::default();
    state.select(Some(app.tool_selection));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let mut lines = vec![Line::from("")];
    match app.selected_tool() {
        Some(tool) => {
            lines.push(Line::from(vec![
                Span::styled(" Tool  ", Style::default().fg(Color::DarkGray)),
                Span::styled(tool.name.clone(), Style::default().fg(Color::White)),
            ]));
            if let Some(description) = tool.description() {
                lines.push(Line::from(Span::styled(
                    format!(" {description}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => lines.push(Line::from(Span::styled(
            " No tool selected",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(" Press "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" to run the test"),
    ]));

    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("TEST"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(detail, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_positions() {
        assert_eq!(slider(0.0, 0.0, 2.0, 4), "●────");
        assert_eq!(slider(1.0, 0.0, 2.0, 4), "━━●──");
        assert_eq!(slider(2.0, 0.0, 2.0, 4), "━━━━●");
    }
}
