use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tidalshift::{cli, config, error, types::AccountRole, types::PkceToken, warning};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize one account with the Tidal API
    Auth(AuthOptions),

    /// Full account migration (artists -> albums -> tracks -> playlists)
    Full(FullOptions),

    /// Migrate followed artists only
    Artists,

    /// Migrate favorite albums only
    Albums,

    /// Migrate liked tracks only
    Tracks(TracksOptions),

    /// Migrate self-created playlists only
    Playlists,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Which account to authenticate (run once per role)
    #[clap(long, value_enum)]
    pub account: AccountRole,
}

#[derive(Parser, Debug, Clone)]
pub struct FullOptions {
    /// Wipe destination tracks before copying (asks for confirmation)
    #[clap(long)]
    pub wipe: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Wipe destination tracks before copying (asks for confirmation)
    #[clap(long)]
    pub wipe: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    // Nothing is persisted mid-batch, so an interrupt can simply stop the
    // run; the destination is left with whatever was already replayed.
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            warning!("Interrupted. Already-migrated items remain on the destination.");
        }
        _ = run(cli.command) => {}
    }
}

async fn run(command: Command) {
    match command {
        Command::Auth(opt) => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(opt.account, Arc::clone(&oauth_result)).await;
        }
        Command::Full(opt) => cli::migrate_full(opt.wipe).await,
        Command::Artists => cli::migrate_artists().await,
        Command::Albums => cli::migrate_albums().await,
        Command::Tracks(opt) => cli::migrate_tracks(opt.wipe).await,
        Command::Playlists => cli::migrate_playlists().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
