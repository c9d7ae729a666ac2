use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use pr_overlay::{
    load_config, update, App, GhCli, GitRemoteContext, Message, OverlayController, StatusCache,
    TerminalHost, Timestamp,
};

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Review and CI status for the open pull requests of a GitHub repository
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Cmd>,

    /// Repository as owner/name (defaults to the origin remote)
    #[arg(long, global = true)]
    repo: Option<String>,

    /// Repository last-updated time (RFC 3339); looked up with gh when omitted
    #[arg(long, global = true)]
    updated_at: Option<String>,

    /// Reviewer login to leave out of the reviewer list (repeatable)
    #[arg(long = "ignore", value_name = "LOGIN", global = true)]
    ignore: Vec<String>,

    /// Only annotate these PR numbers (repeatable)
    #[arg(long = "pr", value_name = "NUMBER", global = true)]
    prs: Vec<u64>,

    /// Maximum number of open pull requests to fetch
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Path or name of the GitHub CLI
    #[arg(long = "gh", value_name = "PATH", global = true)]
    gh_program: Option<String>,

    /// Config file (defaults to <config dir>/pr-overlay/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Show overlays, using cached data while it is still current
    Show {
        /// Always fetch from GitHub
        #[arg(short, long)]
        force: bool,
    },
    /// Remove rendered overlays. A fresh process has none; this is for hosts embedding the app
    Clear,
    /// Show overlays and refresh them periodically
    Watch {
        /// Seconds between refreshes
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PR_OVERLAY_LOG")
                .unwrap_or_else(|_| "pr_overlay=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let mut gh = GhCli::new();
    if let Some(program) = cli.gh_program.clone().or(config.gh_program.clone()) {
        gh = gh.with_program(program);
    }
    if let Some(limit) = cli.limit.or(config.limit) {
        gh = gh.with_limit(limit);
    }

    let updated_at = cli
        .updated_at
        .as_deref()
        .map(Timestamp::parse)
        .transpose()
        .context("Invalid --updated-at")?;
    let context = GitRemoteContext::new(gh.clone())
        .with_repo(cli.repo.clone())
        .with_updated_at(updated_at);

    let mut ignored = config.ignored_reviewers.clone();
    ignored.extend(cli.ignore.iter().cloned());

    let cache = StatusCache::new();
    let controller = OverlayController::new(&cache, gh, ignored);
    let stdout = io::stdout();
    let host = TerminalHost::new(stdout.lock())
        .with_rows(cli.prs.iter().copied())
        .with_color(stdout.is_terminal());
    let mut app = App::new(controller, context, host);

    match cli.command.unwrap_or(Cmd::Show { force: false }) {
        Cmd::Show { force } => {
            let msg = if force {
                Message::ShowForced
            } else {
                Message::Show
            };
            update(&mut app, msg)?;
        }
        Cmd::Clear => update(&mut app, Message::Clear)?,
        Cmd::Watch { interval } => {
            let secs = interval
                .or(config.refresh_interval_secs)
                .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
                .max(1);
            app.auto_refresh = true;
            update(&mut app, Message::Show)?;
            loop {
                thread::sleep(Duration::from_secs(secs));
                update(&mut app, Message::RefreshEvent)?;
            }
        }
    }

    Ok(())
}
