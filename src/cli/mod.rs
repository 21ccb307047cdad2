//! Command-line interface for rosterr.

pub mod commands;

use clap::{Parser, Subcommand};

/// rosterr - User roster manager
/// Keeps users, email addresses, and role assignments in a local database
#[derive(Parser)]
#[command(name = "rosterr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a user to the roster
    #[command(alias = "a")]
    Add {
        /// Short name, e.g. "Alice"
        name: String,

        /// Full name, e.g. "Alice Algebra"
        #[arg(long)]
        fullname: Option<String>,

        /// Nickname, e.g. "al"
        #[arg(long)]
        nickname: Option<String>,
    },

    /// List all users
    #[command(alias = "ls", alias = "l")]
    List {
        /// Emit the list as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a user with their emails and roles
    #[command(alias = "i")]
    Info {
        /// User ID
        id: i32,
    },

    /// Remove a user from the roster
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// User ID to remove
        id: i32,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage email addresses
    Email {
        #[command(subcommand)]
        command: EmailCommands,
    },

    /// Manage roles and assignments
    Role {
        #[command(subcommand)]
        command: RoleCommands,
    },

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum EmailCommands {
    /// Add an email address for a user
    Add {
        /// Owning user ID
        user_id: i32,

        /// Address in local@domain form
        address: String,
    },

    /// List email addresses
    #[command(alias = "ls")]
    List {
        /// Restrict to one user
        user_id: Option<i32>,
    },

    /// Remove an email address
    #[command(alias = "rm")]
    Remove {
        /// Email ID
        id: i32,
    },
}

#[derive(Subcommand)]
pub enum RoleCommands {
    /// Define a new role
    Add {
        /// Role name, e.g. "student"
        name: String,

        /// Access level, higher grants more
        access_lvl: i32,

        /// Free-text description
        #[arg(long)]
        desc: Option<String>,
    },

    /// List roles
    #[command(alias = "ls")]
    List {
        /// Emit the list as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Assign a role to a user
    Assign {
        /// User ID
        user_id: i32,

        /// Role name
        role: String,
    },

    /// Revoke a role from a user
    Revoke {
        /// User ID
        user_id: i32,

        /// Role name
        role: String,
    },

    /// List users holding a role
    Members {
        /// Role name
        role: String,
    },

    /// Delete a role and its assignments
    #[command(alias = "rm")]
    Remove {
        /// Role name
        name: String,
    },
}
