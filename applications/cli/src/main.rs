//! Octolist - browse GitHub users from the terminal
use clap::{Parser, Subcommand};
use octo_cli::{render, App, AppConfig};
use octo_core::UserId;
use octo_state::{UserDetailIntent, UserListCoordinator, UserListIntent, UserListState};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "octo")]
#[command(about = "Browse GitHub users with an offline cache", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "OCTO_CONFIG")]
    config: Option<PathBuf>,

    /// Behave as if the network were down
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cached users, fetching the first page if the cache is empty
    List,
    /// Fetch the first page again and replace the cache with it
    Refresh,
    /// Load further pages after the last user shown
    More {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Search cached users by login
    Search {
        /// Case-insensitive substring of the login
        query: String,
    },
    /// Show every field of one cached user
    Show {
        /// User id
        id: UserId,
    },
    /// Delete every cached user
    ClearCache,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing; logs go to stderr so listings stay pipeable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = App::connect(&config).await?;
    if cli.offline {
        tracing::info!("Offline mode: remote calls are disabled");
        app.go_offline();
    }

    match cli.command {
        Commands::List => list(&app).await,
        Commands::Refresh => refresh(&app).await,
        Commands::More { pages } => more(&app, pages).await,
        Commands::Search { query } => search(&app, query).await,
        Commands::Show { id } => show(&app, id).await,
        Commands::ClearCache => clear_cache(&app).await,
    }
}

/// List coordinator after its initial cache snapshot (and bootstrap fetch)
async fn settled_list(app: &App) -> UserListCoordinator {
    let coordinator = app.list_coordinator();
    coordinator.wait_until_idle().await;
    coordinator
}

fn print_list(coordinator: &UserListCoordinator) {
    let state = coordinator.state();
    print!("{}", render::user_list(&state));
    println!("{}", render::list_summary(&state));
    print_error(&state);
}

fn print_error(state: &UserListState) {
    if let Some(message) = &state.error_message {
        eprintln!("{message}");
    }
}

async fn list(app: &App) -> anyhow::Result<()> {
    let coordinator = settled_list(app).await;
    print_list(&coordinator);
    Ok(())
}

async fn refresh(app: &App) -> anyhow::Result<()> {
    let coordinator = settled_list(app).await;

    coordinator.send_intent(UserListIntent::RefreshUsers);
    coordinator.wait_until_idle().await;

    print_list(&coordinator);
    Ok(())
}

async fn more(app: &App, pages: u32) -> anyhow::Result<()> {
    let coordinator = settled_list(app).await;
    let before = coordinator.state().users.len();

    for page in 1..=pages {
        coordinator.send_intent(UserListIntent::LoadNextPage);
        coordinator.wait_until_idle().await;

        let state = coordinator.state();
        tracing::info!(page, users = state.users.len(), "Loaded page");
        if state.error_message.is_some() || !state.has_more_pages {
            break;
        }
    }

    let state = coordinator.state();
    print!("{}", render::user_rows(state.users.get(before..).unwrap_or_default()));
    println!("{}", render::page_summary(&state, before));
    print_error(&state);
    Ok(())
}

async fn search(app: &App, query: String) -> anyhow::Result<()> {
    let coordinator = settled_list(app).await;

    coordinator.send_intent(UserListIntent::ToggleSearch);
    coordinator.send_intent(UserListIntent::SearchUsers(query));
    coordinator.wait_until_idle().await;

    print_list(&coordinator);
    Ok(())
}

async fn show(app: &App, id: UserId) -> anyhow::Result<()> {
    let coordinator = app.detail_coordinator();

    coordinator.send_intent(UserDetailIntent::LoadUser(id));
    coordinator.wait_until_idle().await;

    let state = coordinator.state();
    if let Some(message) = state.error_message.as_deref() {
        anyhow::bail!("{message}");
    }
    if let Some(text) = render::user_detail(&state) {
        print!("{text}");
    }
    Ok(())
}

async fn clear_cache(app: &App) -> anyhow::Result<()> {
    app.cache().clear_all().await?;
    println!("Cache cleared");
    Ok(())
}
