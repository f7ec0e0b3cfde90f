//! The presentation state machine: one activation of the overlay over the
//! current document, from toggle-on to toggle-off.

use std::sync::LazyLock;
use std::time::Instant;

use anyhow::Result;
use log::{debug, warn};
use regex::Regex;

use crate::deck::{self, Deck};
use crate::document::{PageSnapshot, SlideSource, resolve_page_root};
use crate::input::{Command, KeyEvent, is_toggle_shortcut, route};
use crate::render::{OverlaySurface, compose_frame};
use crate::theme::Theme;
use crate::watch::Debounce;

static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)slide-(\d+)").unwrap());

/// What a toggle request did, reported back to the transport that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Activated,
    Deactivated,
    /// No presentable page root was found; nothing changed.
    NotAvailable,
}

pub struct Session<S: SlideSource, O: OverlaySurface> {
    source: S,
    surface: O,
    theme: Theme,
    active: bool,
    observing: bool,
    snapshot: PageSnapshot,
    deck: Deck,
    current: usize,
    debounce: Debounce,
    panel_visible: bool,
    notes_visible: bool,
    fullscreen: bool,
    started: Option<Instant>,
}

impl<S: SlideSource, O: OverlaySurface> Session<S, O> {
    pub fn new(source: S, surface: O, theme: Theme) -> Self {
        Self {
            source,
            surface,
            theme,
            active: false,
            observing: false,
            snapshot: PageSnapshot::default(),
            deck: Deck::default(),
            current: 0,
            debounce: Debounce::default(),
            panel_visible: false,
            notes_visible: false,
            fullscreen: false,
            started: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.deck.len()
    }

    pub fn surface(&self) -> &O {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut O {
        &mut self.surface
    }

    /// Preset notes visibility for the next activation.
    pub fn set_notes_visible(&mut self, on: bool) {
        self.notes_visible = on;
        if self.active {
            self.render();
        }
    }

    /// The command interface exposed to the external toggle transport.
    /// Failures come back as `Err` for the transport to report; they never
    /// leave a half-activated overlay behind.
    pub fn handle_toggle(&mut self) -> Result<ToggleOutcome> {
        if self.active {
            self.deactivate();
            return Ok(ToggleOutcome::Deactivated);
        }
        if self.activate()? {
            Ok(ToggleOutcome::Activated)
        } else {
            Ok(ToggleOutcome::NotAvailable)
        }
    }

    /// Scan the document and bring the overlay up. Nothing is touched until
    /// a page root resolves, so an abort here needs no cleanup.
    fn activate(&mut self) -> Result<bool> {
        let snapshot = self.source.snapshot()?;
        let Some(root) = resolve_page_root(&snapshot) else {
            warn!("no page root found; staying inactive");
            return Ok(false);
        };
        let deck = deck::build_deck(&snapshot, root);
        let resume = self
            .surface
            .fragment()
            .as_deref()
            .and_then(parse_fragment)
            .unwrap_or(0);
        self.current = resume.min(deck.len().saturating_sub(1));
        self.snapshot = snapshot;
        self.deck = deck;
        self.surface.show();
        self.surface.block_scroll(true);
        self.active = true;
        self.observing = true;
        self.started = Some(Instant::now());
        debug!("activated with {} slides at index {}", self.deck.len(), self.current);
        self.render();
        Ok(true)
    }

    /// Tear down the overlay and release everything the activation took:
    /// observer, pending debounce, scroll lock, fullscreen. A no-op while
    /// already inactive.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.debounce.cancel();
        self.observing = false;
        if self.fullscreen {
            self.surface.set_fullscreen(false);
            self.fullscreen = false;
        }
        self.surface.block_scroll(false);
        self.surface.hide();
        self.active = false;
        self.snapshot = PageSnapshot::default();
        self.deck = Deck::default();
        self.current = 0;
        self.panel_visible = false;
        self.notes_visible = false;
        self.started = None;
        debug!("deactivated");
    }

    /// Clamp into bounds and show slide `index`. Ignored while inactive or
    /// with an empty deck.
    pub fn go_to(&mut self, index: usize) {
        if !self.active || self.deck.is_empty() {
            return;
        }
        self.current = index.min(self.deck.len() - 1);
        self.render();
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.deck.len() {
            self.go_to(self.current + 1);
        }
    }

    pub fn prev(&mut self) {
        if self.current > 0 {
            self.go_to(self.current - 1);
        }
    }

    /// Rebuild the deck from a fresh snapshot and repaint, keeping the index
    /// inside the new bounds. Active state never changes here.
    pub fn rescan_and_render(&mut self) {
        if !self.active {
            return;
        }
        let snapshot = match self.source.snapshot() {
            Ok(s) => s,
            Err(e) => {
                warn!("rescan failed: {e:#}");
                return;
            }
        };
        let Some(root) = resolve_page_root(&snapshot) else {
            warn!("page root disappeared; keeping previous deck");
            return;
        };
        self.deck = deck::build_deck(&snapshot, root);
        self.snapshot = snapshot;
        self.current = self.current.min(self.deck.len().saturating_sub(1));
        debug!("rescan produced {} slides", self.deck.len());
        self.render();
    }

    /// Record one observed document mutation. Only arms the timer while the
    /// observer is attached.
    pub fn note_mutation(&mut self, now: Instant) {
        if self.active && self.observing {
            self.debounce.note(now);
        }
    }

    /// Drive the debounce clock; runs the rescan once per quiet period.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.poll(now) && self.active {
            self.rescan_and_render();
        }
    }

    /// Feed one key event through the router. Returns true when the event
    /// was consumed and the host page must not see it.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if is_toggle_shortcut(event) {
            if let Err(e) = self.handle_toggle() {
                warn!("toggle failed: {e:#}");
            }
            return true;
        }
        if !self.active {
            return false;
        }
        let Some(command) = route(event) else {
            return false;
        };
        self.handle_command(command);
        true
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Next => self.next(),
            Command::Prev => self.prev(),
            Command::First => self.go_to(0),
            Command::Last => self.go_to(self.deck.len().saturating_sub(1)),
            Command::Jump(index) => {
                // Numbered jumps outside the deck are ignored, not clamped.
                if index < self.deck.len() {
                    self.go_to(index);
                }
            }
            Command::Exit => self.deactivate(),
            Command::Rescan => self.rescan_and_render(),
            Command::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                self.render();
            }
            Command::CycleTheme => {
                self.theme = self.theme.cycled();
                self.render();
            }
            Command::ToggleNotes => {
                self.notes_visible = !self.notes_visible;
                self.render();
            }
            Command::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                self.surface.set_fullscreen(self.fullscreen);
            }
        }
    }

    fn render(&mut self) {
        if !self.active || self.deck.is_empty() {
            return;
        }
        let elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        let frame = compose_frame(
            &self.snapshot,
            &self.deck,
            self.current,
            &self.theme,
            self.panel_visible,
            self.notes_visible,
            elapsed,
        );
        self.surface.paint(&frame);
        self.surface.replace_fragment(&frame.fragment);
    }
}

/// Parse a `slide-<N>` fragment into a 0-based index. Anything malformed
/// counts as absent.
fn parse_fragment(fragment: &str) -> Option<usize> {
    let caps = FRAGMENT_RE.captures(fragment)?;
    let n: usize = caps[1].parse().ok()?;
    Some(n.max(1) - 1)
}
