use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rust_decimal::Decimal;
use std::io;
use std::str::FromStr;

use crate::db::Database;
use crate::error::Error;
use crate::models::NewExpense;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &Database) -> Result<()> {
    let mut app = App::new();
    if let Err(e) = app.refresh_all(db) {
        tracing::error!("Initial load failed: {e}");
        app.set_status(e.to_string());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db),
                InputMode::Command => handle_command_input(key, app, db),
                InputMode::Editing => handle_editing_input(key, app, db),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &Database) {
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
        KeyCode::Char('1') => switch_screen(app, db, Screen::Entry),
        KeyCode::Char('2') => switch_screen(app, db, Screen::Records),
        KeyCode::Char('3') => switch_screen(app, db, Screen::Analysis),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, db, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, db, screens[prev]);
        }
        KeyCode::Char('i') => {
            if app.screen != Screen::Entry {
                switch_screen(app, db, Screen::Entry);
            }
            app.status_message.clear();
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Enter if app.screen == Screen::Entry => {
            app.status_message.clear();
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        KeyCode::Char('g') => {
            if app.screen == Screen::Records {
                scroll_to_top(&mut app.expense_index, &mut app.expense_scroll);
            }
        }
        KeyCode::Char('G') => {
            if app.screen == Screen::Records {
                scroll_to_bottom(
                    &mut app.expense_index,
                    &mut app.expense_scroll,
                    app.expenses.len(),
                    app.visible_rows,
                );
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.screen == Screen::Records {
                let half_page = app.visible_rows / 2;
                for _ in 0..half_page {
                    handle_move_down(app);
                }
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.screen == Screen::Records {
                let half_page = app.visible_rows / 2;
                for _ in 0..half_page {
                    handle_move_up(app);
                }
            }
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &Database) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            if let Err(e) = commands::handle_command(&input, app, db) {
                tracing::error!("Command ':{input}' failed: {e}");
                app.set_status(e.to_string());
            }
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
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, db: &Database) {
    match key.code {
        KeyCode::Enter => submit_expense(app, db),
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form.focus = app.form.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form.focus = app.form.focus.prev();
        }
        KeyCode::Backspace => {
            app.form.value_mut().pop();
        }
        KeyCode::Char(c) => {
            app.form.value_mut().push(c);
        }
        _ => {}
    }
}

fn submit_expense(app: &mut App, db: &Database) {
    let amount_str = app.form.amount.trim();
    // An empty amount reads as zero so it fails validation with the other fields
    let amount = if amount_str.is_empty() {
        Decimal::ZERO
    } else {
        match Decimal::from_str(amount_str) {
            Ok(a) => a,
            Err(_) => {
                app.set_status(format!("Invalid amount: {amount_str}"));
                return;
            }
        }
    };

    let new = NewExpense {
        title: app.form.title.clone(),
        amount,
        category: app.form.category.clone(),
        memo: app.form.memo.clone(),
    };

    match db.insert_expense(&new) {
        Ok(id) => {
            let title = new.title;
            app.form.clear();
            app.input_mode = InputMode::Normal;
            refresh_after_change(app, db);
            app.set_status(format!("Added '{title}' (#{id})"));
        }
        Err(e @ Error::Validation(_)) => {
            app.set_status(e.to_string());
        }
        Err(e) => {
            tracing::error!("Saving expense failed: {e}");
            app.set_status(e.to_string());
        }
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &Database, screen: Screen) {
    app.screen = screen;
    let refreshed = match screen {
        Screen::Entry | Screen::Records => app.refresh_records(db),
        Screen::Analysis => app.refresh_analysis(db),
    };
    match refreshed {
        Ok(()) => app.set_status(format!("{screen}")),
        Err(e) => {
            tracing::error!("Refreshing {screen} failed: {e}");
            app.set_status(e.to_string());
        }
    }
}

fn refresh_after_change(app: &mut App, db: &Database) {
    if let Err(e) = app.refresh_all(db) {
        tracing::error!("Refresh after insert failed: {e}");
        app.set_status(e.to_string());
    }
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Entry => {
            app.form.focus = app.form.focus.next();
        }
        Screen::Records => {
            scroll_down(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.expenses.len(),
                app.visible_rows,
            );
        }
        Screen::Analysis => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Entry => {
            app.form.focus = app.form.focus.prev();
        }
        Screen::Records => {
            scroll_up(&mut app.expense_index, &mut app.expense_scroll);
        }
        Screen::Analysis => {}
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
