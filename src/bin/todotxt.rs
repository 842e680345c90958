use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::env;
use std::fs::File;
use std::path::Path;
use todotxt::cli::{self, Command};
use todotxt::config::Config;
use todotxt::context::{AppContext, StandardContext};
use todotxt::filter::ActiveFilter;
use todotxt::model::dates::parse_date;
use todotxt::model::{Priority, Recurrence, Task};
use todotxt::store::TodoFile;

const NO_HEADER: &str = "(none)";

fn init_logging(ctx: &dyn AppContext) {
    let log_config = simplelog::ConfigBuilder::new().build();
    let file = ctx
        .get_log_path()
        .and_then(|p| File::create(&p).with_context(|| format!("creating {}", p.display())));
    let result = match file {
        Ok(file) => WriteLogger::init(LevelFilter::Debug, log_config, file),
        Err(_) => TermLogger::init(
            LevelFilter::Warn,
            log_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };
    if let Err(e) = result {
        eprintln!("Logging disabled: {}", e);
    }
}

fn check_date_spec(spec: &str) -> Result<()> {
    if spec.is_empty() || parse_date(spec).is_some() || Recurrence::parse(spec).is_some() {
        return Ok(());
    }
    bail!("'{}' is neither a date (YYYY-MM-DD) nor a spec like 3d", spec)
}

fn print_task(number: usize, task: &Task) {
    println!("{:>3} {}", number, task);
}

fn list(config: &Config, todo: &TodoFile, search: Option<String>, all: bool, today: NaiveDate) {
    let mut filter = if all {
        ActiveFilter {
            hide_hidden: false,
            ..Default::default()
        }
    } else {
        config.default_filter()
    };
    filter.search = search.unwrap_or_default();
    let mut shown = filter.apply(todo.tasks(), today);
    let sort = config.sort_spec();
    sort.sort(todo.tasks(), &mut shown, today);
    for group in sort.group(todo.tasks(), &shown, NO_HEADER) {
        if !group.title.is_empty() {
            println!("== {} ({}) ==", group.title, group.members.len());
        }
        for &i in &group.members {
            print_task(i + 1, &todo.tasks()[i]);
        }
    }
    println!("--");
    println!("{} of {} tasks shown", shown.len(), todo.len());
}

fn edit(
    todo: &mut TodoFile,
    command: Command,
    config: &Config,
    done: &Path,
    today: NaiveDate,
) -> Result<()> {
    match command {
        Command::Add { text } => {
            let stamp = config.prepend_date.then_some(today);
            let i = todo.add(&text, stamp);
            print_task(i + 1, &todo.tasks()[i]);
        }
        Command::Do { number } => {
            let spawned = todo.complete(number - 1, today)?;
            print_task(number, &todo.tasks()[number - 1]);
            if let Some(i) = spawned {
                println!("Next occurrence:");
                print_task(i + 1, &todo.tasks()[i]);
            }
        }
        Command::Undo { number } => {
            todo.uncomplete(number - 1)?;
            print_task(number, &todo.tasks()[number - 1]);
        }
        Command::Pri { number, priority } => {
            let priority: Priority = priority.parse()?;
            let task = todo.task_mut(number - 1)?;
            task.set_priority(priority);
            print_task(number, task);
        }
        Command::Due { number, date } => {
            check_date_spec(&date)?;
            let task = todo.task_mut(number - 1)?;
            let base = cli::defer_base(&date, task.due_date_value(), today);
            task.defer_due_date(&date, base);
            print_task(number, task);
        }
        Command::Threshold { number, date } => {
            check_date_spec(&date)?;
            let task = todo.task_mut(number - 1)?;
            let base = cli::defer_base(&date, task.threshold_date_value(), today);
            task.defer_threshold_date(&date, base);
            print_task(number, task);
        }
        Command::Append { number, text } => {
            let task = todo.task_mut(number - 1)?;
            task.append(&text);
            print_task(number, task);
        }
        Command::Rm { number } => {
            let removed = todo.remove(number - 1)?;
            println!("Removed: {}", removed);
        }
        Command::Archive => {
            let moved = todo.archive(done)?;
            println!("Archived {} tasks to {}", moved, done.display());
        }
        Command::List { .. } | Command::Help => {}
    }
    Ok(())
}

fn run(command: Command, ctx: &dyn AppContext, today: NaiveDate) -> Result<()> {
    let config = Config::load_or_default(ctx)?;
    let todo_path = config.todo_path(ctx)?;

    match command {
        Command::Help => cli::print_help("todotxt"),
        Command::List { search, all } => {
            let todo = TodoFile::load(&todo_path)?;
            list(&config, &todo, search, all, today);
        }
        command => {
            let done_path = config.done_path(ctx)?;
            TodoFile::modify(&todo_path, |todo| {
                edit(todo, command, &config, &done_path, today)
            })?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = cli::parse_args(&args)?;

    if invocation.command == Command::Help {
        cli::print_help("todotxt");
        return Ok(());
    }

    let ctx = StandardContext::new(invocation.root);
    init_logging(&ctx);
    let today = Local::now().date_naive();
    log::debug!("running {:?} for {}", invocation.command, today);
    run(invocation.command, &ctx, today)
}
