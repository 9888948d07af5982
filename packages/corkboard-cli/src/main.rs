use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use corkboard_core::{search, Board, Column, LocalStore, Task, TaskDraft};

#[derive(Parser)]
#[command(
    name = "corkboard",
    about = "Local three-column kanban task board",
    version
)]
struct Args {
    /// Board file (default: <platform data dir>/corkboard/board.json)
    #[arg(long, env = "CORKBOARD_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a task.
    ///
    /// New tasks land in the backlog unless --column says otherwise.
    Add {
        title: String,
        /// Longer free-text description
        #[arg(long, short)]
        description: Option<String>,
        /// Due date, ISO-8601 (2026-09-01 or 2026-09-01T09:00:00Z)
        #[arg(long)]
        due: Option<String>,
        /// Target column: backlog, inprogress, done
        #[arg(long, value_parser = parse_column)]
        column: Option<Column>,
    },
    /// Show the board, column by column.
    List {
        /// Only this column
        #[arg(long, value_parser = parse_column)]
        column: Option<Column>,
    },
    /// Move a task to another column.
    Move {
        id: u64,
        /// Target column: backlog, inprogress, done
        #[arg(value_parser = parse_column)]
        column: Column,
    },
    /// Delete a task.
    Rm { id: u64 },
    /// Filter tasks by case-insensitive substring of title or description.
    Search { term: String },
    /// Export all tasks as CSV to stdout or a file.
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Import tasks from a CSV file. Every row becomes a new task; nothing
    /// is merged or de-duplicated.
    Import { file: PathBuf },
}

/// Strict column names for the command line. Only CSV import is lenient
/// about unknown values.
fn parse_column(s: &str) -> Result<Column, String> {
    match s {
        "backlog" => Ok(Column::Backlog),
        "inprogress" => Ok(Column::InProgress),
        "done" => Ok(Column::Done),
        other => Err(format!(
            "unknown column '{}' (expected backlog, inprogress, or done)",
            other
        )),
    }
}

fn board_file(args: &Args) -> Result<PathBuf> {
    if let Some(file) = &args.file {
        return Ok(file.clone());
    }
    let base = dirs::data_dir().context("could not determine the platform data directory")?;
    Ok(base.join("corkboard").join("board.json"))
}

fn print_task(task: &Task) {
    let due = match &task.due_date {
        Some(due) if search::is_overdue_now(task) => format!("  (due {}, overdue)", due),
        Some(due) => format!("  (due {})", due),
        None => String::new(),
    };
    println!("  #{:<4} {}{}", task.id, task.title, due);
    if !task.description.is_empty() {
        for line in task.description.lines() {
            println!("        {}", line);
        }
    }
}

fn print_column(board: &Board, column: Column) {
    let tasks = board.tasks_in(column);
    println!("{} ({})", column.title(), tasks.len());
    for task in &tasks {
        print_task(task);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let path = board_file(&args)?;
    log::debug!("[corkboard.cli] Using board file {}", path.display());
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
    }
    let store = LocalStore::open(&path)
        .with_context(|| format!("opening board file {}", path.display()))?;
    let board = Board::new(Arc::new(store));

    match args.command {
        Command::Add {
            title,
            description,
            due,
            column,
        } => {
            let task = board.create(TaskDraft {
                title,
                description: description.unwrap_or_default(),
                due_date: due,
                column: column.unwrap_or_default(),
            })?;
            println!("Added #{} to {}", task.id, task.column.title());
        }
        Command::List { column } => match column {
            Some(column) => print_column(&board, column),
            None => {
                for column in Column::ALL {
                    print_column(&board, column);
                }
            }
        },
        Command::Move { id, column } => {
            let task = board.move_task(id, column)?;
            println!("Moved #{} to {}", task.id, task.column.title());
        }
        Command::Rm { id } => {
            board.delete(id)?;
            println!("Deleted #{}", id);
        }
        Command::Search { term } => {
            let hits = board.filter(&term);
            if hits.is_empty() {
                println!("No tasks match '{}'", term);
            } else {
                for task in &hits {
                    print_task(task);
                }
            }
        }
        Command::Export { output } => {
            let csv_text = board.export_csv();
            match output {
                Some(out) => {
                    fs::write(&out, &csv_text)
                        .with_context(|| format!("writing {}", out.display()))?;
                    println!("Exported {} tasks to {}", board.tasks().len(), out.display());
                }
                None => println!("{}", csv_text),
            }
        }
        Command::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let count = board.import_csv(&text)?;
            println!("Imported {} tasks", count);
        }
    }

    Ok(())
}
