use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "biblio")]
#[command(about = "Command-line client for a library catalog server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the catalog server (overrides config and BIBLIO_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login {
        username: String,
        password: String,
    },

    /// Log out and forget the stored session
    Logout,

    /// Create an account (does not log you in)
    Register {
        username: String,
        password: String,

        /// Request an administrator account
        #[arg(long)]
        admin: bool,
    },

    /// List books
    #[command(alias = "ls")]
    List {
        /// Only books currently available to borrow
        #[arg(long)]
        available: bool,

        /// Search term (title or author)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search books by title or author
    Search { query: String },

    /// Borrow a book
    #[command(alias = "b")]
    Borrow {
        /// Id of the book
        id: String,
    },

    /// Return a borrowed book
    #[command(alias = "r")]
    Return {
        /// Id of the book
        id: String,
    },

    /// Add a book to the catalog (admin)
    Add {
        title: String,
        author: String,
        isbn: String,
    },

    /// Update a book's fields (admin)
    Update {
        /// Id of the book
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        isbn: Option<String>,

        /// Mark the book available or not (true/false)
        #[arg(long)]
        available: Option<bool>,
    },

    /// Delete a book from the catalog (admin)
    #[command(alias = "rm")]
    Delete {
        /// Id of the book
        id: String,
    },

    /// Show the current session
    Whoami,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., api-url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
