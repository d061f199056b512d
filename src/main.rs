//! p10ctl — a terminal control panel for a P10 LED-matrix RSS/clock display.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐   Msg     ┌──────────┐  draw()  ┌──────────┐
//! │ poll.rs  │ ────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (tasks)  │ (channel) │ (state)  │          │ (render) │
//! └──────────┘           └──────────┘          └──────────┘
//!                             ▲ │ Action
//!                handle_key() │ ▼
//!               ┌──────────┐  dispatch() ──► roster.rs ──► store/
//!               │ input.rs │               settings.rs ──► store/
//!               └──────────┘
//! ```
//!
//! * **`store/`** — the `Store` trait and the HTTP client for the device.
//! * **`model`** — the device's JSON wire types.
//! * **`roster`** — read-modify-write mutations of the feed list.
//! * **`settings`** — settings records and one-shot device actions.
//! * **`poll`** — periodic time/status refresh tasks.
//! * **`notify`** — the transient status message region.
//! * **`app`** / **`input`** / **`ui`** — TUI state, key handling, rendering.
//! * **`main`** — wires everything together: logging, the terminal guard,
//!   the event loop, and `dispatch`, which runs each user action as an
//!   in-flight task.
//!
//! The runtime is single-threaded (`current_thread` flavor): UI events,
//! timer ticks, and request completions interleave cooperatively. Nothing
//! serialises overlapping roster mutations — see `roster.rs` for why that
//! is the device protocol's problem and how it shows.

mod app;
mod input;
mod model;
mod notify;
mod poll;
mod roster;
mod settings;
mod store;
mod ui;

use std::io;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

use app::{Action, App};
use notify::Kind;
use poll::Msg;
use roster::RosterManager;
use settings::SettingsClient;
use store::HttpStore;

/// The device's AP-mode address; override with the first CLI argument.
const DEFAULT_BASE_URL: &str = "http://192.168.4.1";

type HttpRoster = RosterManager<HttpStore>;
type HttpSettings = SettingsClient<HttpStore>;

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.  This prevents the common TUI bug where a panic leaves the
/// terminal in a broken state.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.  Without this, a panic inside the event loop would leave
/// raw mode enabled and the alternate screen active.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Log to a file; a terminal sink would draw over the UI.
/// Level comes from `P10CTL_LOG` (default `info`).
fn init_logging() -> Result<()> {
    let level = std::env::var("P10CTL_LOG").unwrap_or_else(|_| "info".to_string());
    let level = LevelFilter::from_str(&level).unwrap_or(LevelFilter::Info);
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("p10ctl.log")?;
    WriteLogger::init(level, config, file)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging()?;
    install_panic_hook();

    // -- parse arguments -----------------------------------------------------
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // -- device clients ------------------------------------------------------
    let device = Arc::new(HttpStore::new(&base_url));
    let roster = RosterManager::new(device.clone());
    let settings = SettingsClient::new(device.clone());

    // -- background work -----------------------------------------------------
    let (tx, mut rx) = mpsc::channel::<Msg>(64);

    // Time/status refresh fire immediately, then every 30s / 60s.
    poll::spawn(device.clone(), tx.clone());
    // One bootstrap fetch per component, hydrating independently.
    spawn_bootstrap(&roster, &settings, &tx);

    // Keyboard events come from a blocking reader thread.
    let (event_tx, mut event_rx) = mpsc::channel::<Event>(64);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(ev) => {
                if event_tx.blocking_send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();

    // Expires notification clear-deadlines between other events.
    let mut maintenance = tokio::time::interval(Duration::from_millis(250));

    // -- main event loop -----------------------------------------------------
    // Each iteration renders, then waits for the next wake-up:
    //   * a background completion (poll result, mutation outcome),
    //   * a keyboard event, possibly producing an Action to dispatch,
    //   * the maintenance tick.
    loop {
        guard.terminal.draw(|f| ui::draw(&app, f))?;

        tokio::select! {
            Some(msg) = rx.recv() => {
                app.handle_msg(msg, Instant::now());
            }
            Some(ev) = event_rx.recv() => {
                if let Event::Key(key) = ev {
                    if let Some(action) = input::handle_key_event(&mut app, key) {
                        dispatch(action, &device, &roster, &settings, &tx);
                    }
                }
            }
            _ = maintenance.tick() => {
                app.notifier.tick(Instant::now());
            }
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal. In-flight requests
    // are simply abandoned.
    Ok(())
}

// ---------------------------------------------------------------------------
// Action dispatch
// ---------------------------------------------------------------------------

/// Run one user action as an in-flight task.
///
/// Each task reports through the notification region with the action's
/// generic error text on failure. Nothing here serialises overlapping
/// roster mutations.
fn dispatch(
    action: Action,
    device: &Arc<HttpStore>,
    roster: &HttpRoster,
    settings: &HttpSettings,
    tx: &mpsc::Sender<Msg>,
) {
    match action {
        Action::SaveDisplay(record) => {
            let client = settings.clone();
            run_notify(tx, "Error updating display settings", async move {
                client.save_display(&record).await
            });
        }
        Action::SaveContent(flags) => {
            let client = settings.clone();
            run_notify(tx, "Error updating scroll content", async move {
                client.save_content(&flags).await
            });
        }
        Action::SaveRss(record) => {
            let client = settings.clone();
            run_notify(tx, "Error updating RSS settings", async move {
                client.save_rss(&record).await
            });
        }
        Action::SetTimezone(tz) => {
            let client = settings.clone();
            let device = device.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                match client.set_timezone(&tz).await {
                    Ok(text) => {
                        let _ = tx.send(Msg::Notify(text, Kind::Success)).await;
                        // Give the device a moment to apply the zone
                        // before re-reading the clock.
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        poll::refresh_time_once(device, tx);
                    }
                    Err(e) => {
                        warn!("timezone update failed: {e:#}");
                        let _ = tx
                            .send(Msg::Notify("Error updating timezone".to_string(), Kind::Error))
                            .await;
                    }
                }
            });
        }
        Action::SetManualTime(datetime) => {
            let client = settings.clone();
            let device = device.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                match client.set_manual_time(&datetime).await {
                    Ok(text) => {
                        let _ = tx.send(Msg::Notify(text, Kind::Success)).await;
                        poll::refresh_time_once(device, tx);
                    }
                    Err(e) => {
                        warn!("manual time set failed: {e:#}");
                        let _ = tx
                            .send(Msg::Notify("Error setting time".to_string(), Kind::Error))
                            .await;
                    }
                }
            });
        }
        Action::ToggleFeed { index, enabled } => {
            let roster = roster.clone();
            run_notify(tx, "Error updating feed", async move {
                roster.toggle(index, enabled).await
            });
        }
        Action::EditFeedUrl { index, url } => {
            let roster = roster.clone();
            run_notify(tx, "Error updating feed URL", async move {
                roster.set_url(index, &url).await
            });
        }
        Action::AddFeed { name, url } => {
            let worker = roster.clone();
            run_notify_reload(tx, "Error adding feed", roster.clone(), async move {
                worker.add(&name, &url).await
            });
        }
        Action::RemoveFeed { index } => {
            let worker = roster.clone();
            run_notify_reload(tx, "Error removing feed", roster.clone(), async move {
                worker.remove(index).await
            });
        }
        Action::ResetFeeds => {
            let worker = roster.clone();
            run_notify_reload(tx, "Error resetting feeds", roster.clone(), async move {
                worker.reset().await
            });
        }
        Action::FetchNow => {
            let roster = roster.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let _ = tx
                    .send(Msg::Notify("Fetching RSS feeds...".to_string(), Kind::Success))
                    .await;
                let msg = match roster.fetch_now().await {
                    Ok(text) => Msg::Notify(text, Kind::Success),
                    Err(e) => {
                        warn!("rss fetch trigger failed: {e:#}");
                        Msg::Notify("Error fetching RSS".to_string(), Kind::Error)
                    }
                };
                let _ = tx.send(msg).await;
            });
        }
    }
}

/// Spawn `operation` and report its outcome in the notification region.
fn run_notify<F>(tx: &mpsc::Sender<Msg>, error_text: &'static str, operation: F)
where
    F: std::future::Future<Output = Result<String>> + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let msg = match operation.await {
            Ok(text) => Msg::Notify(text, Kind::Success),
            Err(e) => {
                warn!("{error_text}: {e:#}");
                Msg::Notify(error_text.to_string(), Kind::Error)
            }
        };
        let _ = tx.send(msg).await;
    });
}

/// Like [`run_notify`], then re-render the roster from a fresh fetch.
/// Used by structural mutations (add, remove, reset); value edits keep
/// the in-place row the user already sees.
fn run_notify_reload<F>(
    tx: &mpsc::Sender<Msg>,
    error_text: &'static str,
    roster: HttpRoster,
    operation: F,
) where
    F: std::future::Future<Output = Result<String>> + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        match operation.await {
            Ok(text) => {
                let _ = tx.send(Msg::Notify(text, Kind::Success)).await;
                match roster.load().await {
                    Ok(feeds) => {
                        let _ = tx.send(Msg::Roster(feeds)).await;
                    }
                    Err(e) => {
                        warn!("roster reload failed: {e:#}");
                        let _ = tx
                            .send(Msg::Notify("Error loading feeds".to_string(), Kind::Error))
                            .await;
                    }
                }
            }
            Err(e) => {
                warn!("{error_text}: {e:#}");
                let _ = tx.send(Msg::Notify(error_text.to_string(), Kind::Error)).await;
            }
        }
    });
}

/// One bootstrap fetch per component; each hydrates its view
/// independently and reports its own load failure.
fn spawn_bootstrap(roster: &HttpRoster, settings: &HttpSettings, tx: &mpsc::Sender<Msg>) {
    let worker = roster.clone();
    let roster_tx = tx.clone();
    tokio::spawn(async move {
        let msg = match worker.load().await {
            Ok(feeds) => Msg::Roster(feeds),
            Err(e) => {
                warn!("initial roster load failed: {e:#}");
                Msg::Notify("Error loading feeds".to_string(), Kind::Error)
            }
        };
        let _ = roster_tx.send(msg).await;
    });

    let display_client = settings.clone();
    let display_tx = tx.clone();
    tokio::spawn(async move {
        let msg = match display_client.load_display().await {
            Ok(record) => Msg::DisplayLoaded(record),
            Err(e) => {
                warn!("display settings load failed: {e:#}");
                Msg::Notify("Error loading display settings".to_string(), Kind::Error)
            }
        };
        let _ = display_tx.send(msg).await;
    });

    let rss_client = settings.clone();
    let rss_tx = tx.clone();
    tokio::spawn(async move {
        let msg = match rss_client.load_rss().await {
            Ok(record) => Msg::RssLoaded(record),
            Err(e) => {
                warn!("rss settings load failed: {e:#}");
                Msg::Notify("Error loading RSS settings".to_string(), Kind::Error)
            }
        };
        let _ = rss_tx.send(msg).await;
    });
}
