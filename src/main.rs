//! gradle-pins - pinned Gradle tasks from the command line
//!
//! Reads the build descriptions of the workspace folders, keeps the pinned
//! task list in the workspace state file and prints both trees.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

mod terminal;

use crate::terminal::{AutoConfirm, PresetPrompt, TerminalConfirm, TerminalPrompt};
use gradle_pins::commands::{
    ClearAllPinnedTasksCommand, Command, PinTaskCommand, PinTaskWithArgsCommand,
    RemovePinnedTaskCommand,
};
use gradle_pins::pins::{JsonFileStateStore, PinnedTasksStore};
use gradle_pins::tasks::{normalize_args, FileBuildClient, GradleTaskProvider, TaskCatalog};
use gradle_pins::host::{ConfirmDialog, InputPrompt};
use gradle_pins::views::{
    render_tree, GradleTasksProvider, Icons, PinnedTasksProvider, TaskNode, TreeItem, ViewNode,
};
use gradle_pins::workspace::{RootProjectsStore, WorkspaceFolder};
use gradle_pins::{ExtensionConfig, PinError, Result, TaskDefinition, TaskId};

#[derive(Parser)]
#[command(name = "gradle-pins")]
#[command(version)]
#[command(about = "Pin favourite Gradle tasks, with or without arguments", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Workspace directory (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// Workspace folder holding a root project (repeatable, overrides settings)
    #[arg(long = "folder", global = true, value_name = "PATH")]
    folders: Vec<PathBuf>,

    /// Keep pinned tasks in the user data directory instead of the workspace
    #[arg(long, global = true)]
    global_state: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every discovered task
    Tasks,

    /// Show the pinned tasks
    Pinned {
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pin a task without arguments
    Pin {
        /// Task id or script name
        task: String,
    },

    /// Pin a task with arguments
    PinArgs {
        /// Task id or script name
        task: String,

        /// Arguments to pin the task with (prompted for when omitted)
        #[arg(long, allow_hyphen_values = true)]
        args: Option<String>,
    },

    /// Remove a pinned task
    Unpin {
        /// Task id or script name
        task: String,

        /// Arguments the task was pinned with
        #[arg(long, allow_hyphen_values = true)]
        args: Option<String>,
    },

    /// Remove every pinned task
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Everything a command needs, wired the way the host wires it on activation.
struct App {
    store: Arc<PinnedTasksStore>,
    task_provider: Arc<GradleTaskProvider>,
    gradle_tasks: GradleTasksProvider,
    pinned: Arc<PinnedTasksProvider>,
    icons: Icons,
}

impl App {
    async fn open(cli: &Cli) -> Result<Self> {
        let workspace = cli
            .workspace
            .canonicalize()
            .unwrap_or_else(|_| cli.workspace.clone());
        if !workspace.exists() {
            return Err(PinError::config_with_path(
                "Workspace directory does not exist",
                workspace,
            ));
        }

        let config = ExtensionConfig::load(&workspace)?;
        config.validate(&workspace)?;

        let folders = if cli.folders.is_empty() {
            config.folders(&workspace)
        } else {
            cli.folders
                .iter()
                .enumerate()
                .map(|(index, path)| WorkspaceFolder::from_path(index, absolute(&workspace, path)))
                .collect()
        };

        let mut root_projects = RootProjectsStore::new();
        root_projects.populate(folders);
        let root_projects = Arc::new(root_projects);

        let client = Arc::new(FileBuildClient::new(&config.build_description_file));
        let task_provider = Arc::new(GradleTaskProvider::new(client));
        task_provider.load_tasks(&root_projects).await?;

        let state_path = if cli.global_state {
            ExtensionConfig::global_state_path()
                .ok_or_else(|| PinError::config("No user data directory available"))?
        } else {
            config.state_path(&workspace)
        };
        debug!(path = %state_path.display(), "Opening state file");
        let state = Arc::new(JsonFileStateStore::open(state_path)?);
        let store = Arc::new(PinnedTasksStore::load(state, config.pinned_tasks_key.clone())?);

        let icons = Icons::new(config.resources_dir(&workspace));
        let gradle_tasks =
            GradleTasksProvider::new(root_projects.clone(), task_provider.clone(), icons.clone());
        let pinned = Arc::new(PinnedTasksProvider::new(
            store.clone(),
            root_projects,
            task_provider.clone(),
            icons.clone(),
        ));

        Ok(Self {
            store,
            task_provider,
            gradle_tasks,
            pinned,
            icons,
        })
    }

    /// Catalog node for a task id or an unambiguous script name.
    fn task_node(&self, query: &str) -> Result<ViewNode> {
        let catalog = self.task_provider.catalog();
        let definition = find_task(&catalog, query)?;
        let running = self.task_provider.is_running(&definition.id);
        Ok(ViewNode::Task(TaskNode::new(definition, running, &self.icons)))
    }

    /// Pinned node for the exact `(task, args)` entry, if it is shown.
    fn pinned_node(&self, definition: &TaskDefinition, args: Option<&str>) -> Option<ViewNode> {
        let args = normalize_args(args);
        self.pinned
            .project()
            .tasks()
            .find(|node| node.definition.id == definition.id && node.args == args)
            .cloned()
            .map(ViewNode::PinnedTask)
    }
}

fn absolute(workspace: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.join(path)
    }
}

fn find_task(catalog: &TaskCatalog, query: &str) -> Result<TaskDefinition> {
    if let Some(definition) = catalog.resolve(&TaskId::from_raw(query)) {
        return Ok(definition.clone());
    }

    match catalog.find_by_script(query).as_slice() {
        [] => Err(PinError::TaskNotFound(query.to_string())),
        [definition] => Ok((*definition).clone()),
        candidates => Err(PinError::AmbiguousTask {
            script: query.to_string(),
            candidates: candidates.iter().map(|d| d.id.to_string()).collect(),
        }),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let app = App::open(&cli).await?;

    match cli.command {
        Commands::Tasks => {
            for failure in app.task_provider.failures() {
                eprintln!("{} {}", "Warning:".yellow().bold(), failure);
            }
            print!("{}", render_tree(&app.gradle_tasks.get_children(None)));
        }

        Commands::Pinned { json } => {
            let nodes = app.pinned.get_children(None);
            if json {
                println!("{}", serde_json::to_string_pretty(&nodes)?);
            } else {
                print!("{}", render_tree(&nodes));
            }
        }

        Commands::Pin { task } => {
            let node = app.task_node(&task)?;
            PinTaskCommand::new(app.pinned.clone())
                .run(Some(&node))
                .await?;
            println!("{} Pinned {}", "OK".green().bold(), node.label().cyan());
        }

        Commands::PinArgs { task, args } => {
            let node = app.task_node(&task)?;
            let prompt: Arc<dyn InputPrompt> = match args {
                Some(args) => Arc::new(PresetPrompt(args)),
                None => Arc::new(TerminalPrompt),
            };
            let before = app.store.len();
            PinTaskWithArgsCommand::new(app.pinned.clone(), prompt)
                .run(Some(&node))
                .await?;

            if app.store.len() > before {
                let label = app
                    .store
                    .get_all()
                    .last()
                    .and_then(|entry| entry.args.clone())
                    .map(|args| format!("{} {}", node.label(), args))
                    .unwrap_or_else(|| node.label().to_string());
                println!("{} Pinned {}", "OK".green().bold(), label.cyan());
            } else {
                println!("{} Nothing pinned", "Skipped:".yellow().bold());
            }
        }

        Commands::Unpin { task, args } => {
            let definition = find_task(&app.task_provider.catalog(), &task)?;
            let Some(node) = app.pinned_node(&definition, args.as_deref()) else {
                println!(
                    "{} {} is not pinned",
                    "Warning:".yellow().bold(),
                    definition.script
                );
                return Ok(());
            };
            RemovePinnedTaskCommand::new(app.pinned.clone())
                .run(Some(&node))
                .await?;
            println!("{} Unpinned {}", "OK".green().bold(), node.label().cyan());
        }

        Commands::Clear { yes } => {
            let dialog: Arc<dyn ConfirmDialog> = if yes {
                Arc::new(AutoConfirm)
            } else {
                Arc::new(TerminalConfirm)
            };
            let before = app.store.len();
            ClearAllPinnedTasksCommand::new(app.store.clone(), dialog)
                .run(None)
                .await?;

            if before == 0 {
                println!("{} No pinned tasks to clear", "Skipped:".yellow().bold());
            } else if app.store.is_empty() {
                println!("{} Pinned tasks cleared", "OK".green().bold());
            } else {
                println!("{} Pinned tasks kept", "Skipped:".yellow().bold());
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "gradle_pins=debug,info"
    } else {
        "gradle_pins=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
