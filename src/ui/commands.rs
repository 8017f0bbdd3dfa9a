use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use std::str::FromStr;

use super::app::{App, Screen};
use crate::db::Database;
use crate::error::Error;
use crate::models::NewExpense;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("e", "Go to Entry", cmd_entry, r);
    register_command!("entry", "Go to Entry", cmd_entry, r);
    register_command!("r", "Go to Records", cmd_records, r);
    register_command!("records", "Go to Records", cmd_records, r);
    register_command!("a", "Go to Analysis", cmd_analysis, r);
    register_command!("analysis", "Go to Analysis", cmd_analysis, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add Coffee 4.50 Food morning latte)",
        cmd_add,
        r
    );
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_entry(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Entry;
    app.refresh_records(db)?;
    Ok(())
}

fn cmd_records(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Records;
    app.refresh_records(db)?;
    Ok(())
}

fn cmd_analysis(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Analysis;
    app.refresh_analysis(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <title> <amount> <category> [memo]. Example: :add Coffee 4.50 Food");
        return Ok(());
    }

    let parts: Vec<&str> = args.splitn(4, ' ').collect();
    if parts.len() < 3 {
        app.set_status("Usage: :add <title> <amount> <category> [memo]");
        return Ok(());
    }

    let title = parts[0];
    let amount_str = parts[1];
    let category = parts[2];
    let memo = parts.get(3).copied().unwrap_or("");

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    let new = NewExpense {
        title: title.to_string(),
        amount,
        category: category.to_string(),
        memo: memo.to_string(),
    };

    match db.insert_expense(&new) {
        Ok(id) => {
            app.refresh_records(db)?;
            app.refresh_analysis(db)?;
            app.set_status(format!("Added '{title}' (#{id})"));
        }
        Err(e @ Error::Validation(_)) => {
            app.set_status(e.to_string());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let date = chrono::Local::now().format("%Y-%m-%d");
        format!("{home}/expensetui-export-{date}.csv")
    } else {
        crate::run::shellexpand(args)
    };

    let count = db.export_to_csv(Path::new(&path))?;
    if count == 0 {
        app.set_status("No expenses to export");
    } else {
        app.set_status(format!("Exported {count} expenses to {path}"));
    }
    Ok(())
}
