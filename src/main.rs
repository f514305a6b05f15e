use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use botdash::api::BackendClient;
use botdash::app::{App, InputMode, Tab};
use botdash::config;
use botdash::runtime::RuntimeBridge;
use botdash::{logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "botdash",
    version,
    about = "botdash: terminal dashboard for a DingTalk bot backend"
)]
struct Args {
    /// Backend base URL (e.g. http://localhost:8000)
    #[arg(long)]
    api: Option<String>,

    /// Config file, overrides BOTDASH_CONFIG and the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Periodic status check in seconds, 0 disables it
    #[arg(long)]
    refresh: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = match args.config.as_deref() {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(err) => {
            // Still on the normal screen, so stderr is visible
            eprintln!("{err}; using defaults");
            (config::Config::default(), Some(err))
        }
    };

    let api_base = config::normalize_api_base(args.api.as_deref().unwrap_or(&config.api_base));
    let status_refresh = match args.refresh {
        Some(secs) => config::refresh_interval(secs),
        None => config.status_refresh(),
    };

    match config.log_dir() {
        Some(dir) => {
            if let Err(err) = logging::init(&dir) {
                eprintln!("logging disabled: {err:#}");
            }
        }
        None => eprintln!("logging disabled: no data directory"),
    }
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "config not loaded, using defaults");
    }
    tracing::info!(api = %api_base, ?status_refresh, "starting botdash");

    let client = BackendClient::new(api_base.clone())?;
    let runtime = RuntimeBridge::new(Arc::new(client), status_refresh)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(err) => {
            let _ = disable_raw_mode();
            let _ = leave_screen(&mut io::stdout());
            return Err(err.into());
        }
    };

    let mut app = App::new(api_base);
    app.init();

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "dashboard exited with error");
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Undo `EnterAlternateScreen` and `EnableMouseCapture`
fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

/// Apply worker results, then hand queued requests to the worker
fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_event(event);
    }
    for cmd in app.take_commands() {
        if let Err(err) = runtime.send(cmd) {
            tracing::error!(error = %err, "failed to queue backend request");
            app.show_error(err.to_string());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Message => handle_message_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // a form field being edited gets every key
    if let Some(module) = app.active_module() {
        if module.captures_input() {
            let action = module.handle_key(key);
            app.apply_action(action);
            return;
        }
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char(':') => app.enter_command(),
        KeyCode::Char('r') => app.check_system_status(),
        KeyCode::Char('R') => app.load_tab_data(app.current_tab),
        KeyCode::Tab => app.cycle_tab(true),
        KeyCode::BackTab => app.cycle_tab(false),
        KeyCode::Char(ch) if Tab::from_shortcut(ch).is_some() => {
            if let Some(tab) = Tab::from_shortcut(ch) {
                app.switch_tab(tab);
            }
        }
        _ => handle_tab_key(app, key),
    }
}

fn handle_tab_key(app: &mut App, key: KeyEvent) {
    match app.current_tab {
        Tab::Dashboard => match key.code {
            KeyCode::Char('i') | KeyCode::Char('e') => app.enter_message_input(),
            KeyCode::Enter => app.quick_test(),
            _ => {}
        },
        Tab::McpConfig => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.move_tool_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => app.move_tool_cursor(true),
            KeyCode::Enter | KeyCode::Char('t') => {
                if let Some(name) = app.tool_under_cursor().map(|tool| tool.name.clone()) {
                    app.test_specific_tool(&name);
                }
            }
            _ => {}
        },
        Tab::LlmConfig | Tab::DingTalkConfig => {
            if let Some(module) = app.active_module() {
                let action = module.handle_key(key);
                app.apply_action(action);
            }
        }
        Tab::TestTools => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.move_tool_selection(false),
            KeyCode::Down | KeyCode::Char('j') => app.move_tool_selection(true),
            KeyCode::Enter => app.test_tool(),
            _ => {}
        },
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn handle_message_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_message_input(),
        KeyCode::Enter => {
            app.exit_message_input();
            app.quick_test();
        }
        KeyCode::Backspace => {
            app.test_message.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.test_message.push(ch);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open || app.input_mode != InputMode::Normal {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(tab) = ui::layout::tab_at(areas.tab_bar, mouse.column, mouse.row) {
                app.switch_tab(tab);
            }
        }
        MouseEventKind::ScrollUp => handle_scroll(app, false),
        MouseEventKind::ScrollDown => handle_scroll(app, true),
        _ => {}
    }
}

fn handle_scroll(app: &mut App, forward: bool) {
    match app.current_tab {
        Tab::McpConfig => app.move_tool_cursor(forward),
        Tab::TestTools => app.move_tool_selection(forward),
        _ => {}
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
