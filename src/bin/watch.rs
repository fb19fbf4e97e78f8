//! Golestan grade watcher
//!
//! Logs into the portal, navigates to the configured term's grades frame
//! and polls until killed, notifying on every newly published grade.

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use golestan_watch::notify::{AudioSink, DesktopSink, NotifySink, TelegramSink};
use golestan_watch::{
    config, CdpSession, Dispatcher, FileConfig, Overrides, PollConfig, PortalLayout,
    SessionOptions, ShutdownFlag, Watcher,
};
use log::{info, warn};
use std::path::PathBuf;

const NOTIFY_TITLE: &str = "Golestan Grade Checker";

#[derive(Parser, Debug)]
#[command(name = "golestan-watch", version, about = "Watches the Golestan portal for newly published grades")]
struct Cli {
    /// JSON config file (fields: login_url, term_index, poll_interval_secs, telegram)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Portal login URL
    #[arg(long)]
    login_url: Option<String>,

    /// Which term to watch (1-based row in the term status table)
    #[arg(long)]
    term: Option<usize>,

    /// Seconds to wait between poll cycles
    #[arg(long)]
    interval: Option<u64>,

    /// Launch the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Enable Telegram delivery (token and chat id from config file or
    /// TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID)
    #[arg(long)]
    telegram: bool,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        login_url: cli.login_url,
        term_index: cli.term,
        poll_interval_secs: cli.interval,
        telegram_enabled: cli.telegram,
    };
    let config = PollConfig::resolve(overrides, file)?;
    let credentials = config::credentials_from_env()?;

    let mut dispatcher = Dispatcher::new();
    dispatcher.push(Box::new(DesktopSink::new(NOTIFY_TITLE).with_sound()));
    if !cfg!(target_os = "macos") {
        dispatcher.push(Box::new(AudioSink));
    }
    if let Some(telegram) = &config.telegram {
        dispatcher.push(Box::new(TelegramSink::new(telegram)?));
    }

    // Startup notice goes to the desktop only, without sound.
    if let Err(err) = DesktopSink::new(NOTIFY_TITLE).deliver("Golestan grade watcher is running") {
        warn!("{}", err);
    }

    let layout = PortalLayout::default();
    let mut session =
        CdpSession::launch(SessionOptions::new().headless(!cli.headed)).context("browser launch failed")?;
    let shutdown = ShutdownFlag::new();

    info!("watching term {} every {:?}", config.term_index, config.poll_interval);
    let mut watcher = Watcher::new(&mut session, &layout, &dispatcher, &config, shutdown);
    watcher.run(&credentials)?;

    Ok(())
}
