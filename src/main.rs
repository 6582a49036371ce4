use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::debug;

use taskdesk::auth::{LoginRequest, RegisterForm};
use taskdesk::config::Config;
use taskdesk::i18n::{self, Locale};
use taskdesk::models::{Task, TaskForm};
use taskdesk::notify::TerminalNotifier;
use taskdesk::router::View;
use taskdesk::storage::FileStorage;
use taskdesk::{App, AppError};

#[derive(Parser, Debug)]
#[command(name = "taskdesk", version, about = "Manage your tasks from the terminal")]
struct Cli {
    /// Root URL of the task API
    #[arg(long, env = "API_BASE_URL")]
    api_url: Option<String>,

    /// File holding the session token, user and language preference
    #[arg(long, env = "TASKDESK_STATE_FILE")]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKDESK_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        remember: bool,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKDESK_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        accept_terms: bool,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Set the preferred language (en, es)
    Lang { code: String },
    /// Resolve a client path and show where it lands
    Open { path: String },
    /// Work with tasks
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Subcommand, Debug)]
enum TaskAction {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// pending, in_progress or completed
        #[arg(long, default_value = "pending")]
        status: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: String,
    },
    Delete {
        id: i64,
    },
}

fn task_form(title: String, description: Option<String>, status: &str) -> TaskForm {
    TaskForm {
        title,
        description,
        // An unknown status is reported by validation like a missing one.
        status: status.parse().ok(),
    }
}

fn print_task(locale: Locale, task: &Task) {
    let status = i18n::t(locale, &format!("tasks.status.{}", task.status));
    println!("#{:<5} [{}] {}", task.id, status, task.title);
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!("       {}", description);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(path) = cli.state_file {
        config.state_file = path;
    }
    debug!(
        "Using API {} with state file {}",
        config.api_base_url,
        config.state_file.display()
    );

    let storage = Arc::new(FileStorage::open(&config.state_file)?);
    let notifier = Arc::new(TerminalNotifier::new());
    let app = App::new(&config, storage, notifier)?;

    match cli.command {
        Command::Login {
            email,
            password,
            remember,
        } => {
            let credentials = LoginRequest {
                email,
                password,
                remember: remember.then_some(true),
            };
            app.login(credentials).await?;
        }
        Command::Register {
            name,
            email,
            password,
            confirm_password,
            accept_terms,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password,
                accept_terms,
            };
            app.register(form).await?;
        }
        Command::Logout => app.logout().await?,
        Command::Whoami => {
            let navigation = app.navigate("/")?;
            match app.session().user() {
                Some(user) if navigation.view == View::Dashboard => {
                    println!("{} <{}>", user.name, user.email)
                }
                _ => println!("{}", i18n::t(navigation.locale, "auth.sign_in_required")),
            }
        }
        Command::Lang { code } => {
            app.set_language(&code)?;
        }
        Command::Open { path } => {
            let navigation = app.navigate(&path)?;
            match &navigation.redirected_from {
                Some(from) => println!("{} -> {} ({})", from, navigation.path, navigation.name),
                None => println!("{} ({})", navigation.path, navigation.name),
            }
        }
        Command::Tasks { action } => match action {
            TaskAction::List => {
                let tasks = app.list_tasks().await?;
                let locale = app.locale();
                if tasks.is_empty() {
                    println!("{}", i18n::t(locale, "tasks.empty"));
                }
                for task in &tasks {
                    print_task(locale, task);
                }
            }
            TaskAction::Show { id } => {
                let task = app.show_task(id).await?;
                print_task(app.locale(), &task);
            }
            TaskAction::Create {
                title,
                description,
                status,
            } => {
                let task = app
                    .create_task(task_form(title, description, &status))
                    .await?;
                print_task(app.locale(), &task);
            }
            TaskAction::Update {
                id,
                title,
                description,
                status,
            } => {
                let task = app
                    .update_task(id, task_form(title, description, &status))
                    .await?;
                print_task(app.locale(), &task);
            }
            TaskAction::Delete { id } => {
                app.delete_task(id).await?;
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !already_reported(&e) {
                eprintln!("{}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Errors the app has already shown through the notifier.
fn already_reported(error: &AppError) -> bool {
    matches!(
        error,
        AppError::Validation(_) | AppError::Api(_) | AppError::Denied(_)
    )
}
