use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use std::path::PathBuf;
use taskplanner::{
    JsonFile, Priority, SortKey, Status, Storage, Task, TaskDir, TaskFilter, TaskPatch, TaskStore,
    parse_deadline,
};

#[derive(Parser)]
#[command(name = "taskplanner")]
#[command(about = "Personal task planner with durable file storage")]
#[command(version)]
struct Cli {
    /// Storage location: a JSON file, or a directory with --per-file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Store each task as its own <id>.txt file instead of one JSON file
    #[arg(long)]
    per_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        title: String,
        description: String,
        /// Due date, YYYY-MM-DD
        deadline: String,
        /// Low, Medium or High
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Update fields of an existing task (omitted fields keep their values)
    Update {
        id: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// New due date, YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Pending or Completed
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a task
    Delete { id: u32 },

    /// Mark a task as completed
    Done { id: u32 },

    /// List tasks in insertion order, or sorted by a field
    List {
        /// id, title, deadline, priority or status
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// List tasks matching every given criterion
    Filter {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Show overdue and near-due pending tasks
    Notify,
}

fn default_store_path(per_file: bool) -> PathBuf {
    let base = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskplanner");
    if per_file {
        base.join("tasks")
    } else {
        base.join("tasks.json")
    }
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| default_store_path(cli.per_file));
    let storage: Box<dyn Storage> = if cli.per_file {
        Box::new(TaskDir::new(&path))
    } else {
        Box::new(JsonFile::new(&path))
    };
    let mut store = TaskStore::open(storage)?;

    match cli.command {
        Commands::Add {
            title,
            description,
            deadline,
            priority,
        } => {
            let priority = priority.as_deref().map(str::parse::<Priority>).transpose()?;
            let task = store.add(&title, &description, &deadline, priority)?;
            println!("Added task {}", task.id);
        }

        Commands::Update {
            id,
            title,
            description,
            deadline,
            priority,
            status,
        } => {
            let patch = TaskPatch {
                title,
                description,
                deadline,
                priority: priority.as_deref().map(str::parse).transpose()?,
                status: status.as_deref().map(str::parse).transpose()?,
            };
            let task = store.update(id, patch)?;
            println!("Updated task {}", task.id);
        }

        Commands::Delete { id } => {
            store.delete(id)?;
            println!("Deleted task {id}");
        }

        Commands::Done { id } => {
            let task = store.mark_complete(id)?;
            println!("Task {} marked as completed", task.id);
        }

        Commands::List { sort } => match sort.as_deref().map(str::parse::<SortKey>).transpose()? {
            Some(key) => print_tasks(&store.sort(key)),
            None => print_tasks(store.tasks()),
        },

        Commands::Filter {
            status,
            priority,
            deadline,
        } => {
            let criteria = TaskFilter {
                status: status.as_deref().map(str::parse).transpose()?,
                priority: priority.as_deref().map(str::parse).transpose()?,
                deadline: deadline.as_deref().map(parse_deadline).transpose()?,
                title: None,
            };
            let matches: Vec<Task> = store.filter(&criteria).into_iter().cloned().collect();
            print_tasks(&matches);
        }

        Commands::Notify => {
            let messages = store.notify();
            if messages.is_empty() {
                println!("Nothing due.");
            } else {
                for message in &messages {
                    println!("{}", message.yellow());
                }
            }
        }
    }

    Ok(())
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let today = chrono::Local::now().date_naive();
    for task in tasks {
        let priority = task
            .priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let line = format!(
            "{}: {} - {} - {} - {} - {}",
            task.id, task.title, task.description, task.deadline, priority, task.status
        );
        // Completed green, overdue red, everything else cyan
        let line = if task.status == Status::Completed {
            line.green()
        } else if task.deadline < today {
            line.red()
        } else {
            line.cyan()
        };
        println!("{line}");
    }
}
