use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod tabs;
pub mod view;

use crate::app::{App, BannerKind, InputMode, Tab, TestOutcome};

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    tabs::draw_tab_bar(f, areas.tab_bar, app);
    tabs::draw_tab(f, areas.body, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    draw_banners(f, areas.size, app);

    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let checked = app
        .status_checked_at
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--".to_string());
    let mut spans = vec![
        Span::styled("API ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.api_base)),
        Span::styled("Tab ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.current_tab.title())),
        Span::styled("Checked ", Style::default().fg(Color::DarkGray)),
        Span::raw(checked),
    ];
    if !app.tools.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Tools ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(app.tools.len().to_string()));
    }
    if app.test_outcome == TestOutcome::Loading {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("⟳ test", Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("tab", "Switch tab: tab <name>"),
        ("refresh", "Check backend status"),
        ("tools", "Reload MCP tools"),
        ("test", "Quick test: test <message>"),
        ("save", "Save the current config form"),
        ("help", "Show key bindings"),
        ("quit", "Exit"),
    ];

    commands
        .into_iter()
        .find(|(cmd, _)| cmd.starts_with(&input))
        .map(|(_, desc)| desc)
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint_text = command_hint(&app.command.input)
                .unwrap_or("tab | refresh | tools | test | save | help | quit");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.as_str()),
                Span::styled(
                    format!("  {hint_text}"),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Message => Line::from(vec![
            Span::styled("> message ", Style::default().fg(Color::LightCyan)),
            Span::styled(
                "Enter=send Esc=done",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Normal => action_hints(app),
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn action_hints(app: &App) -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let mut spans = vec![key("1-5"), Span::raw(" tab  ")];
    match app.current_tab {
        Tab::Dashboard => {
            spans.extend([key("i"), Span::raw(" message  "), key("Enter"), Span::raw(" test  ")]);
        }
        Tab::McpConfig => {
            spans.extend([key("j/k"), Span::raw(" move  "), key("t"), Span::raw(" test tool  ")]);
        }
        Tab::LlmConfig | Tab::DingTalkConfig => {
            spans.extend([key("w"), Span::raw(" save  ")]);
        }
        Tab::TestTools => {
            spans.extend([key("j/k"), Span::raw(" select  "), key("Enter"), Span::raw(" run  ")]);
        }
    }
    spans.extend([
        key("r"),
        Span::raw(" status  "),
        key(":"),
        Span::raw(" cmd  "),
        key("?"),
        Span::raw(" help  "),
        key("q"),
        Span::raw(" quit"),
    ]);
    Line::from(spans)
}

fn draw_banners(f: &mut Frame, size: Rect, app: &App) {
    for (index, banner) in app.banners.iter().enumerate() {
        let Some(area) = layout::banner_area(size, index) else {
            break;
        };
        let color = match banner.kind {
            BannerKind::Success => Color::Green,
            BannerKind::Error => Color::Red,
        };
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            banner.text.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().bg(color))
        .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(64, 64, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-5        Jump to tab"),
        Line::from("  Tab / S-Tab Next / previous tab"),
        Line::from("  Mouse      Click tab, scroll lists"),
        Line::from("  j / k      Move selection (vim)"),
        Line::from("  Esc        Back / close"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  i          Edit quick test message (Dashboard)"),
        Line::from("  Enter      Send quick test / run tool test"),
        Line::from("  t          Test tool under cursor (MCP)"),
        Line::from("  ← / →      Adjust number fields"),
        Line::from("  Space      Toggle switches"),
        Line::from("  w          Save config form"),
        Line::from("  r          Check system status"),
        Line::from("  R          Reload current tab"),
        Line::from("  :          Command line"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :tab mcp-config   :tools   :refresh"),
        Line::from("  :test 查看 pods   :save    :quit"),
        Line::from(""),
        Line::from(format!("Active tab: {}", app.current_tab.title())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_hint_prefix() {
        assert_eq!(command_hint("to"), Some("Reload MCP tools"));
        assert_eq!(command_hint("te"), Some("Quick test: test <message>"));
        assert_eq!(command_hint(""), None);
        assert_eq!(command_hint("zzz"), None);
    }
}
