use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use expense_cli::api::HttpExpenseApi;
use expense_cli::cli::{handle_auth_command, handle_expense_command, AuthCommands, ExpenseCommands};
use expense_cli::config::{ExpensePaths, Settings};
use expense_cli::logging;
use expense_cli::storage::SessionStore;

#[derive(Parser)]
#[command(
    name = "expense",
    author = "Kaylee Beyene",
    version,
    about = "Track personal expenses from the terminal",
    long_about = "expense is a terminal client for a personal expense tracker. \
                  It keeps your expenses on the expense server and shows \
                  filtered lists, totals and per-category summaries."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Expense server URL (overrides the config file)
    #[arg(long, env = "EXPENSE_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Auth(AuthCommands),

    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show current configuration and paths
    Config {
        /// Write the settings file with defaults filled in
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(url) = cli.api_url {
        settings.api_base_url = url;
    }

    let sessions = SessionStore::new(paths.session_file());

    match cli.command {
        Some(Commands::Auth(cmd)) => {
            let api = connect(&settings)?;
            handle_auth_command(&api, &sessions, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let api = connect(&settings)?;
            handle_expense_command(&api, &sessions, &settings, cmd)?;
        }
        Some(Commands::Config { save }) => {
            if save {
                settings.validate()?;
                settings.save(&paths)?;
            }
            println!("expense-cli Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Session file:   {}", paths.session_file().display());
            println!();
            println!("Settings:");
            println!("  API URL:         {}", settings.api_base_url);
            println!("  Page size:       {}", settings.page_size);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Request timeout: {}s", settings.request_timeout_secs);
            println!(
                "  Logged in:       {}",
                match sessions.load()? {
                    Some(session) => session.username,
                    None => "no".to_string(),
                }
            );
        }
        None => {
            println!("expense - Track personal expenses from the terminal");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense login' to get started.");
        }
    }

    Ok(())
}

fn connect(settings: &Settings) -> Result<HttpExpenseApi> {
    settings.validate()?;
    let api = HttpExpenseApi::new(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    Ok(api)
}
