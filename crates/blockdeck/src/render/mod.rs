pub mod sanitize;
pub mod text;

use std::time::Duration;

use crate::deck::{Block, Deck, Slide};
use crate::document::{NodeId, PageSnapshot};
use crate::theme::Theme;

pub use sanitize::Fragment;

const NAV_LABEL_MAX: usize = 50;

/// Everything a surface needs to paint one slide: the sanitized block
/// copies plus the derived chrome (counter, progress, nav panel, notes,
/// timer, fragment for the address bar).
#[derive(Debug, Clone)]
pub struct SlideFrame {
    pub blocks: Vec<Fragment>,
    pub counter: String,
    pub progress: f32,
    pub fragment: String,
    pub nav: Vec<NavEntry>,
    pub notes: Option<String>,
    pub timer: String,
    pub theme: String,
    pub panel_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub title: String,
    pub kind: NavKind,
    pub current: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Title,
    Heading(u8),
    List,
    Code,
    Quote,
    Image,
    Text,
}

/// The overlay the presentation paints into, plus the few host hooks the
/// session needs (scroll lock, fullscreen, address-bar fragment). The live
/// page is never touched through this interface.
pub trait OverlaySurface {
    fn show(&mut self);
    fn hide(&mut self);
    fn block_scroll(&mut self, blocked: bool);
    fn set_fullscreen(&mut self, on: bool);
    fn paint(&mut self, frame: &SlideFrame);
    /// Replace the URL fragment without creating a history entry.
    fn replace_fragment(&mut self, fragment: &str);
    fn fragment(&self) -> Option<String>;
}

/// Project the current slide into a paintable frame.
pub fn compose_frame(
    snapshot: &PageSnapshot,
    deck: &Deck,
    index: usize,
    theme: &Theme,
    panel_visible: bool,
    notes_visible: bool,
    elapsed: Duration,
) -> SlideFrame {
    let total = deck.len();
    let index = index.min(total.saturating_sub(1));
    let slide = &deck.slides[index];

    let blocks = slide
        .blocks
        .iter()
        .map(|b| match b {
            Block::Title { text } => sanitize::title_fragment(text),
            Block::Node(id) => sanitize::sanitize(snapshot, *id),
        })
        .collect();

    let nav = deck
        .slides
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (title, kind) = slide_label(snapshot, s);
            NavEntry {
                title,
                kind,
                current: i == index,
            }
        })
        .collect();

    SlideFrame {
        blocks,
        counter: format!("{} / {}", index + 1, total),
        progress: (index + 1) as f32 / total as f32,
        fragment: format!("slide-{}", index + 1),
        nav,
        notes: notes_visible.then(|| notes_text(snapshot, slide)),
        timer: format_timer(elapsed),
        theme: theme.name.clone(),
        panel_visible,
    }
}

/// Short label for the navigation panel, from the slide's most telling
/// content: heading, then list, code, quote or image, then plain text.
fn slide_label(snapshot: &PageSnapshot, slide: &Slide) -> (String, NavKind) {
    for block in &slide.blocks {
        let id = match block {
            Block::Title { text } => return (text.clone(), NavKind::Title),
            Block::Node(id) => *id,
        };
        if let Some((text, level)) = first_heading_in(snapshot, id) {
            return (truncate(&text), NavKind::Heading(level));
        }
        if has_tag(snapshot, id, &["ul", "ol"]) {
            let text = snapshot.inner_text(id).trim().to_string();
            let label = if text.is_empty() { "List".to_string() } else { truncate(&text) };
            return (label, NavKind::List);
        }
        if has_tag(snapshot, id, &["pre", "code"]) {
            return ("Code Block".to_string(), NavKind::Code);
        }
        if has_tag(snapshot, id, &["blockquote"]) {
            let text = snapshot.inner_text(id).trim().to_string();
            let label = if text.is_empty() { "Quote".to_string() } else { truncate(&text) };
            return (label, NavKind::Quote);
        }
        if has_tag(snapshot, id, &["img"]) {
            return ("Image".to_string(), NavKind::Image);
        }
        let text = snapshot.inner_text(id).trim().to_string();
        if !text.is_empty() {
            return (truncate(&text), NavKind::Text);
        }
    }
    ("Untitled Slide".to_string(), NavKind::Text)
}

fn first_heading_in(snapshot: &PageSnapshot, id: NodeId) -> Option<(String, u8)> {
    for n in snapshot.subtree(id) {
        let tag = snapshot.node(n).tag.as_str();
        if let Some(level) = heading_level(tag) {
            let text = snapshot.inner_text(n);
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some((trimmed.to_string(), level));
            }
        }
    }
    None
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn has_tag(snapshot: &PageSnapshot, id: NodeId, tags: &[&str]) -> bool {
    snapshot
        .subtree(id)
        .into_iter()
        .any(|n| tags.contains(&snapshot.node(n).tag.as_str()))
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= NAV_LABEL_MAX {
        return text.to_string();
    }
    let head: String = text.chars().take(NAV_LABEL_MAX).collect();
    format!("{head}...")
}

/// Plain-text outline of the slide, for the presenter notes panel.
fn notes_text(snapshot: &PageSnapshot, slide: &Slide) -> String {
    let mut lines = Vec::new();
    for block in &slide.blocks {
        let text = match block {
            Block::Title { text } => text.clone(),
            Block::Node(id) => snapshot.inner_text(*id).trim().to_string(),
        };
        if !text.is_empty() {
            lines.push(text);
        }
    }
    lines.join("\n")
}

pub fn format_timer(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::build_deck;
    use crate::document::loader::from_yaml;
    use crate::document::resolve_page_root;

    fn frame_for(yaml: &str, index: usize) -> SlideFrame {
        let snap = from_yaml(yaml).unwrap();
        let root = resolve_page_root(&snap).unwrap();
        let deck = build_deck(&snap, root);
        compose_frame(
            &snap,
            &deck,
            index,
            &Theme::light(),
            false,
            false,
            Duration::from_secs(75),
        )
    }

    #[test]
    fn test_counter_and_progress() {
        let frame = frame_for(
            "body:
  - block: a
  - block: s
    text: '---'
  - block: b",
            1,
        );
        assert_eq!(frame.counter, "2 / 3");
        assert!((frame.progress - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(frame.fragment, "slide-2");
    }

    #[test]
    fn test_timer_format() {
        assert_eq!(format_timer(Duration::from_secs(0)), "00:00");
        assert_eq!(format_timer(Duration::from_secs(75)), "01:15");
        assert_eq!(format_timer(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn test_nav_marks_current_slide() {
        let frame = frame_for(
            "body:
  - block: a
  - block: s
    text: '---'
  - block: b",
            2,
        );
        let current: Vec<bool> = frame.nav.iter().map(|e| e.current).collect();
        assert_eq!(current, vec![false, false, true]);
    }

    #[test]
    fn test_nav_label_from_heading() {
        let frame = frame_for(
            "title: Demo
body:
  - block: a
    children:
      - tag: h2
        text: Agenda",
            0,
        );
        assert_eq!(frame.nav[0].kind, NavKind::Title);
        assert_eq!(frame.nav[0].title, "Demo");
        assert_eq!(frame.nav[1].kind, NavKind::Heading(2));
        assert_eq!(frame.nav[1].title, "Agenda");
    }

    #[test]
    fn test_nav_label_kinds() {
        let frame = frame_for(
            "body:
  - block: a
    children:
      - tag: pre
        text: let x = 1;
  - block: s
    text: '---'
  - block: b
    children:
      - tag: img",
            0,
        );
        assert_eq!(frame.nav[1].title, "Code Block");
        assert_eq!(frame.nav[1].kind, NavKind::Code);
        assert_eq!(frame.nav[2].kind, NavKind::Image);
    }

    #[test]
    fn test_nav_label_truncates_long_text() {
        let long = "x".repeat(80);
        let frame = frame_for(&format!("body:\n  - block: a\n    text: {long}"), 0);
        assert_eq!(frame.nav[1].title.chars().count(), 53);
        assert!(frame.nav[1].title.ends_with("..."));
    }

    #[test]
    fn test_notes_outline_when_visible() {
        let snap = from_yaml("body:\n  - block: a\n    text: First point").unwrap();
        let root = resolve_page_root(&snap).unwrap();
        let deck = build_deck(&snap, root);
        let frame = compose_frame(
            &snap,
            &deck,
            1,
            &Theme::dark(),
            false,
            true,
            Duration::ZERO,
        );
        assert_eq!(frame.notes.as_deref(), Some("First point"));
        assert_eq!(frame.theme, "dark");
    }

    #[test]
    fn test_title_slide_paints_title_fragment() {
        let frame = frame_for("title: Demo\nbody:\n  - block: a", 0);
        assert_eq!(frame.blocks.len(), 1);
        assert_eq!(frame.blocks[0].children[0].tag, "h1");
        assert_eq!(frame.blocks[0].children[0].text, "Demo");
    }
}
