use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{debug, error};

use crate::ledger::Ledger;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: Ledger) -> Result<()> {
    let mut app = App::new(ledger, chrono::Local::now().date_naive());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!("tui exited with error: {e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab bar, status bar, command bar, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.alert.is_some() {
                app.alert = None;
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Editing => handle_editing_input(key, app)?,
                InputMode::Confirm => handle_confirm_input(key, app),
            }
        }
    }
    debug!("tui loop finished");
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(&screen) = Screen::all().get(idx) {
                app.screen = screen;
            }
        }
        KeyCode::Tab => cycle_screen(app, 1),
        KeyCode::BackTab => cycle_screen(app, -1),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('H') => commands::handle_command("prev-month", app)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app)?,
        KeyCode::Char('a') => {
            app.command_input = format!("add-txn {} ", chrono::Local::now().format("%Y-%m-%d"));
            app.input_mode = InputMode::Command;
        }
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete-txn", app)?;
        }
        KeyCode::Char('e') if app.screen == Screen::Transactions => {
            commands::handle_command("rename", app)?;
        }
        KeyCode::Enter if app.screen == Screen::Budgets => {
            if let Some(category) = app.ledger.categories().get(app.budget_index) {
                app.command_input = format!("budget {} ", category.name);
                app.input_mode = InputMode::Command;
            }
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            app.last_failure = None;
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let new_name = app.command_input.trim().to_string();
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            if new_name.is_empty() {
                app.set_status("Edit cancelled");
            } else {
                commands::handle_command(&format!("rename {new_name}"), app)?;
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(),
        _ => app.cancel_pending(),
    }
}

// ── Navigation ───────────────────────────────────────────────

fn cycle_screen(app: &mut App, delta: isize) {
    let screens = Screen::all();
    let current = screens.iter().position(|s| *s == app.screen).unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(screens.len() as isize) as usize;
    app.screen = screens[next];
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let len = app.ledger.len();
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                app.visible_rows,
            );
        }
        Screen::Budgets => {
            if app.budget_index + 1 < app.ledger.categories().len() {
                app.budget_index += 1;
            }
        }
        Screen::Dashboard | Screen::Insights => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Budgets => {
            app.budget_index = app.budget_index.saturating_sub(1);
        }
        Screen::Dashboard | Screen::Insights => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Budgets => app.budget_index = 0,
        Screen::Dashboard | Screen::Insights => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let len = app.ledger.len();
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                app.visible_rows,
            );
        }
        Screen::Budgets => {
            app.budget_index = app.ledger.categories().len().saturating_sub(1);
        }
        Screen::Dashboard | Screen::Insights => {}
    }
}
