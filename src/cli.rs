// File: ./src/cli.rs
//! Command-line parsing and help text shared by the binary.
use anyhow::{Result, bail};
use chrono::NaiveDate;
use std::path::PathBuf;

/// One invocation. Task numbers are 1-based, as printed by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { search: Option<String>, all: bool },
    Add { text: String },
    Do { number: usize },
    Undo { number: usize },
    Pri { number: usize, priority: String },
    Due { number: usize, date: String },
    Threshold { number: usize, date: String },
    Append { number: usize, text: String },
    Rm { number: usize },
    Archive,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub command: Command,
}

fn number(arg: Option<&String>) -> Result<usize> {
    let Some(arg) = arg else {
        bail!("Missing task number");
    };
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => bail!("'{}' is not a task number", arg),
    }
}

/// Parses the arguments after the binary name.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut root = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => {
                let Some(path) = iter.next() else {
                    bail!("--root needs a path");
                };
                root = Some(PathBuf::from(path));
            }
            "-h" | "--help" => rest.insert(0, "help".to_string()),
            _ => rest.push(arg.clone()),
        }
    }

    let Some((verb, params)) = rest.split_first() else {
        return Ok(Invocation {
            root,
            command: Command::List {
                search: None,
                all: false,
            },
        });
    };

    let joined = || params.join(" ");
    let command = match verb.as_str() {
        "list" | "ls" => {
            let all = params.first().is_some_and(|p| p == "-a" || p == "--all");
            let terms = if all { &params[1..] } else { params };
            let search = (!terms.is_empty()).then(|| terms.join(" "));
            Command::List { search, all }
        }
        "add" | "a" => {
            if params.is_empty() {
                bail!("Nothing to add");
            }
            Command::Add { text: joined() }
        }
        "do" => Command::Do {
            number: number(params.first())?,
        },
        "undo" => Command::Undo {
            number: number(params.first())?,
        },
        "pri" => Command::Pri {
            number: number(params.first())?,
            priority: params.get(1).cloned().unwrap_or_else(|| "-".to_string()),
        },
        "due" => Command::Due {
            number: number(params.first())?,
            date: params.get(1).cloned().unwrap_or_default(),
        },
        "t" | "threshold" => Command::Threshold {
            number: number(params.first())?,
            date: params.get(1).cloned().unwrap_or_default(),
        },
        "append" | "app" => Command::Append {
            number: number(params.first())?,
            text: params[1.min(params.len())..].join(" "),
        },
        "rm" | "del" => Command::Rm {
            number: number(params.first())?,
        },
        "archive" => Command::Archive,
        "help" => Command::Help,
        other => bail!("Unknown command '{}'. Try --help.", other),
    };
    Ok(Invocation { root, command })
}

pub fn print_help(binary_name: &str) {
    println!(
        "todotxt v{} - a todo.txt task list manager",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] <command> [args]", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    list [-a] [search]        List tasks (default). -a ignores hide_* settings.");
    println!("    add <text>                Add a task, stamped with today's date.");
    println!("    do <n>                    Complete task n. rec: tasks spawn their next occurrence.");
    println!("    undo <n>                  Reopen task n.");
    println!("    pri <n> [A-Z|-]           Set or clear the priority of task n.");
    println!("    due <n> [date|spec]       Set due date: YYYY-MM-DD, 3d, 1w, 2m, 1y. Empty clears.");
    println!("                              +3d moves the current due date instead of today.");
    println!("    t <n> [date|spec]         Same for the threshold (start) date.");
    println!("    append <n> <text>         Append text to task n.");
    println!("    rm <n>                    Delete task n.");
    println!("    archive                   Move completed tasks to done.txt.");
    println!("    help                      Show this help message.");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("LINE SYNTAX:");
    println!("    x 2024-01-02          Completed, with completion date");
    println!("    (A)                   Priority");
    println!("    2024-01-01            Creation date");
    println!("    @list  +tag           Lists and tags");
    println!("    due:2024-02-01        Due date");
    println!("    t:2024-01-20          Threshold date, hidden until then with hide_future");
    println!("    rec:1w  rec:+1m       Recurrence from completion / from the original date");
    println!("    h:1                   Hidden task");
}

/// Date a relative `due`/`t` spec counts from. A `+` spec counts from the
/// field's current value when it has one; everything else counts from today.
pub fn defer_base(spec: &str, current: Option<NaiveDate>, today: NaiveDate) -> Option<NaiveDate> {
    if spec.starts_with('+') && current.is_some() {
        None
    } else {
        Some(today)
    }
}
