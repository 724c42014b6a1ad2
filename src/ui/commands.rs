use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;

use super::app::{App, Screen};
use crate::models::{self, DATE_FORMAT};
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
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

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("l", "Go to Expenses", cmd_list, r);
    register_command!("list", "Go to Expenses", cmd_list, r);
    register_command!("s", "Go to Statistics", cmd_stats, r);
    register_command!("stats", "Go to Statistics", cmd_stats, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 50 Food 2024-01-15)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 12.50 Transport)", cmd_add, r);
    register_command!(
        "edit",
        "Edit selected expense, or #N (e.g. :edit 3)",
        cmd_edit,
        r
    );
    register_command!(
        "delete",
        "Delete selected expense, or #N (e.g. :delete 3)",
        cmd_delete,
        r
    );
    register_command!("clear", "Delete all expenses", cmd_clear, r);
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
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

/// Split `<amount> <category words...> [date]` into its three parts.
/// A trailing token is taken as the date only when it parses as one.
pub(crate) fn split_add_args(args: &str) -> Option<(String, String, String)> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let (amount, rest) = tokens.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let (category, date) = match rest.split_last() {
        Some((last, middle))
            if !middle.is_empty() && NaiveDate::parse_from_str(last, DATE_FORMAT).is_ok() =>
        {
            (middle.join(" "), last.to_string())
        }
        _ => (rest.join(" "), models::today()),
    };
    Some((amount.to_string(), category, date))
}

/// Parse an optional 1-based `#N` argument into a position.
fn parse_index(args: &str) -> Result<Option<usize>, String> {
    let arg = args.trim().trim_start_matches('#');
    if arg.is_empty() {
        return Ok(None);
    }
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n - 1)),
        _ => Err(format!("Invalid expense number: {args}")),
    }
}

fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_list(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(store);
    Ok(())
}

fn cmd_stats(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.refresh(store);
    if app.expenses.is_empty() {
        app.set_status("No expenses to show statistics.");
    }
    app.screen = Screen::Statistics;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.begin_add();
        return Ok(());
    }

    let Some((amount, category, date)) = split_add_args(args) else {
        app.set_status("Usage: :add <amount> <category> [YYYY-MM-DD]");
        return Ok(());
    };

    match store.add(&amount, &category, &date) {
        Ok(position) => {
            app.refresh(store);
            app.select(position);
            app.set_status(format!("Added #{}", position + 1));
        }
        Err(e) => app.set_status(format!("Error: {e}")),
    }
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    match parse_index(args) {
        Ok(position) => app.begin_edit(position),
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    match parse_index(args) {
        Ok(position) => app.request_delete(position),
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.request_clear();
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/expenses-{}.csv", models::today())
    } else {
        expand_home(args)
    };

    match crate::export::export_csv(store.expenses(), std::path::Path::new(&path)) {
        Ok(0) => app.set_status(format!("No expenses to export (header written to {path})")),
        Ok(count) => app.set_status(format!("Exported {count} expenses to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}
