use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, warn};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer, notify::RecursiveMode};

use crate::config::Config;
use crate::document::loader::FileSource;
use crate::render::text::TextSurface;
use crate::session::{Session, ToggleOutcome};
use crate::theme::Theme;

/// How often the session clock is driven while waiting for file events.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Watch timeout for the filesystem notifier itself; the session applies its
/// own quiet-period policy on top.
const NOTIFY_TIMEOUT: Duration = Duration::from_millis(100);

/// Present the file-backed document and re-segment whenever it changes.
pub fn run(file: &Path, theme_override: Option<&str>) -> Result<()> {
    let config = Config::load_or_default();
    let theme = theme_override.map(Theme::from_name).unwrap_or_else(|| config.theme());

    let mut session = Session::new(FileSource::new(file), TextSurface::new(), theme);
    session.set_notes_visible(config.notes());
    match session.handle_toggle()? {
        ToggleOutcome::Activated => {}
        _ => anyhow::bail!("No presentable content in {}", file.display()),
    }

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(NOTIFY_TIMEOUT, move |result: DebounceEventResult| {
        let _ = tx.send(result);
    })
    .context("Failed to create file watcher")?;
    debouncer
        .watcher()
        .watch(file, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", file.display()))?;

    println!("watching {} (Ctrl-C to stop)", file.display());
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(events)) => {
                debug!("{} file event(s)", events.len());
                session.note_mutation(Instant::now());
            }
            Ok(Err(e)) => warn!("watch error: {e}"),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        session.tick(Instant::now());
        if !session.is_active() {
            break;
        }
    }
    Ok(())
}
