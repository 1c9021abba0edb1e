use biblio::api::{BiblioApi, BookPatch, CmdMessage, ConfigAction, MessageLevel};
use biblio::config::BiblioConfig;
use biblio::error::Result;
use biblio::model::{Book, BookDraft, Role};
use biblio::remote::http::HttpBackend;
use biblio::session::SessionState;
use biblio::store::fs::FileSessionStore;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: BiblioApi<HttpBackend, FileSessionStore>,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Login { username, password }) => handle_login(&mut ctx, username, password),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Register {
            username,
            password,
            admin,
        }) => handle_register(&mut ctx, username, password, admin),
        Some(Commands::List { available, search }) => handle_list(&mut ctx, available, search),
        Some(Commands::Search { query }) => handle_search(&mut ctx, query),
        Some(Commands::Borrow { id }) => handle_borrow(&mut ctx, id),
        Some(Commands::Return { id }) => handle_return(&mut ctx, id),
        Some(Commands::Add {
            title,
            author,
            isbn,
        }) => handle_add(&mut ctx, title, author, isbn),
        Some(Commands::Update {
            id,
            title,
            author,
            isbn,
            available,
        }) => handle_update(&mut ctx, id, title, author, isbn, available),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&mut ctx, false, None),
    }
}

fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BIBLIO_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let proj_dirs =
        ProjectDirs::from("com", "biblio", "biblio").expect("Could not determine data dir");
    proj_dirs.data_dir().to_path_buf()
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir();
    let config = BiblioConfig::load(&data_dir).unwrap_or_default();

    // Precedence: flag, then environment, then config file.
    let api_url = cli
        .api_url
        .clone()
        .or_else(|| std::env::var("BIBLIO_API_URL").ok())
        .unwrap_or_else(|| config.api_url().to_string());

    let backend = HttpBackend::new(api_url);
    let store = FileSessionStore::new(&data_dir);
    let api = BiblioApi::new(backend, store)?;

    Ok(AppContext { api, data_dir })
}

fn handle_login(ctx: &mut AppContext, username: String, password: String) -> Result<()> {
    let result = ctx.api.login(&username, &password)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.logout()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_register(
    ctx: &mut AppContext,
    username: String,
    password: String,
    admin: bool,
) -> Result<()> {
    let role = if admin { Role::Admin } else { Role::Member };
    let result = ctx.api.register(&username, &password, role)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, available: bool, search: Option<String>) -> Result<()> {
    let result = if let Some(query) = search {
        ctx.api.search_books(&query)?
    } else {
        ctx.api.list_books(available)?
    };
    print_books(&result.listed_books, ctx.api.session());
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, query: String) -> Result<()> {
    let result = ctx.api.search_books(&query)?;
    print_books(&result.listed_books, ctx.api.session());
    print_messages(&result.messages);
    Ok(())
}

fn handle_borrow(ctx: &mut AppContext, id: String) -> Result<()> {
    let result = ctx.api.borrow_book(&id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_return(ctx: &mut AppContext, id: String) -> Result<()> {
    let result = ctx.api.return_book(&id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, title: String, author: String, isbn: String) -> Result<()> {
    let result = ctx.api.add_book(BookDraft::new(title, author, isbn))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    id: String,
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    available: Option<bool>,
) -> Result<()> {
    let patch = BookPatch {
        title,
        author,
        isbn,
        available,
    };
    let result = ctx.api.update_book(&id, patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: String) -> Result<()> {
    let result = ctx.api.delete_book(&id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    match ctx.api.session() {
        SessionState::Anonymous => println!("Not logged in."),
        state => {
            let username = state.username().unwrap_or_default();
            match state.role() {
                Some(Role::Admin) => println!("{} {}", username.bold(), "(administrator)".yellow()),
                Some(Role::Member) => println!("{}", username.bold()),
                None => println!("{} {}", username.bold(), "(role unknown)".dimmed()),
            }
        }
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.as_deref(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some("api-url"), None) => ConfigAction::ShowKey("api-url".to_string()),
        (Some("api-url"), Some(v)) => ConfigAction::SetApiUrl(v),
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
            return Ok(());
        }
    };

    let result = biblio::commands::config::run(&ctx.data_dir, action)?;
    if let Some(config) = &result.config {
        println!("api-url = {}", config.api_url());
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const TITLE_WIDTH: usize = 34;
const AUTHOR_WIDTH: usize = 22;
const ISBN_WIDTH: usize = 16;

fn print_books(books: &[Book], session: &SessionState) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }

    let id_width = books.iter().map(|b| b.id.width()).max().unwrap_or(2).min(24);

    for book in books {
        let id = fit_to_width(&book.id, id_width);
        let title = fit_to_width(&book.title, TITLE_WIDTH);
        let author = fit_to_width(&book.author, AUTHOR_WIDTH);
        let isbn = fit_to_width(&book.isbn, ISBN_WIDTH);

        let status = if book.available {
            "available".green()
        } else if book.borrowed_by.as_deref() == session.username() {
            "borrowed by you".yellow()
        } else {
            match &book.borrowed_by {
                Some(borrower) => format!("borrowed by {}", borrower).red(),
                None => "unavailable".red(),
            }
        };

        println!(
            "  {}  {}  {}  {}  {}",
            id.dimmed(),
            title.bold(),
            author,
            isbn.dimmed(),
            status
        );
    }
}

/// Truncate to the display width (with an ellipsis) and pad to it, so the
/// columns line up regardless of content.
fn fit_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    if s.width() > max_width {
        for c in s.chars() {
            let char_width = c.width().unwrap_or(0);
            if current_width + char_width > max_width.saturating_sub(1) {
                result.push('…');
                current_width += 1;
                break;
            }
            result.push(c);
            current_width += char_width;
        }
    } else {
        result.push_str(s);
        current_width = s.width();
    }

    result.push_str(&" ".repeat(max_width.saturating_sub(current_width)));
    result
}
