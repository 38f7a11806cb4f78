//! Account and session CLI commands
//!
//! Implements register, login, logout and whoami.

use clap::{Args, Subcommand};

use super::{prompt_line, prompt_password};
use crate::api::ExpenseApi;
use crate::error::ExpenseResult;
use crate::services::AuthService;
use crate::storage::SessionStore;

/// Username and password options shared by login and register
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted without echo when omitted)
    #[arg(long, env = "EXPENSE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl CredentialArgs {
    fn resolve(self) -> ExpenseResult<(String, String)> {
        let username = match self.username {
            Some(username) => username,
            None => prompt_line("Username: ")?,
        };
        let password = match self.password {
            Some(password) => password,
            None => prompt_password("Password: ")?,
        };
        Ok((username, password))
    }
}

/// Account and session subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Create a new account on the expense server
    Register(CredentialArgs),

    /// Log in and remember the session
    Login(CredentialArgs),

    /// Forget the saved session
    Logout,

    /// Show the logged-in user
    Whoami,
}

/// Handle an account or session command
pub fn handle_auth_command<A: ExpenseApi>(
    api: &A,
    sessions: &SessionStore,
    cmd: AuthCommands,
) -> ExpenseResult<()> {
    let service = AuthService::new(api, sessions);

    match cmd {
        AuthCommands::Register(args) => {
            let (username, password) = args.resolve()?;
            service.register(&username, &password)?;
            println!("Registered user: {}", username.trim());
            println!("Run 'expense login' to start a session.");
        }

        AuthCommands::Login(args) => {
            let (username, password) = args.resolve()?;
            let session = service.login(&username, &password)?;
            println!("Logged in as {}", session.username);
            if let Some(expires_at) = session.expires_at {
                println!("  Session expires: {}", expires_at.format("%Y-%m-%d %H:%M UTC"));
            }
        }

        AuthCommands::Logout => {
            if service.logout()? {
                println!("Logged out.");
            } else {
                println!("No active session.");
            }
        }

        AuthCommands::Whoami => {
            let session = service.current()?;
            println!("Username: {}", session.username);
            println!("User ID:  {}", session.user_id);
            match session.expires_at {
                Some(expires_at) => {
                    println!("Expires:  {}", expires_at.format("%Y-%m-%d %H:%M UTC"))
                }
                None => println!("Expires:  never"),
            }
        }
    }

    Ok(())
}
