//! Terminal overlay surface used by the CLI.

use colored::Colorize;

use super::{Fragment, NavKind, OverlaySurface, SlideFrame};

const PROGRESS_WIDTH: usize = 24;

/// Paints frames to stdout. Stands in for the in-page overlay; the scroll
/// lock and fullscreen hooks only track state here.
#[derive(Debug, Default)]
pub struct TextSurface {
    fragment: Option<String>,
    visible: bool,
    scroll_blocked: bool,
    fullscreen: bool,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl OverlaySurface for TextSurface {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        println!("{}", "presentation ended".dimmed());
    }

    fn block_scroll(&mut self, blocked: bool) {
        self.scroll_blocked = blocked;
    }

    fn set_fullscreen(&mut self, on: bool) {
        self.fullscreen = on;
    }

    fn paint(&mut self, frame: &SlideFrame) {
        let filled = (frame.progress * PROGRESS_WIDTH as f32).round() as usize;
        let bar = format!(
            "{}{}",
            "\u{2588}".repeat(filled.min(PROGRESS_WIDTH)),
            "\u{2591}".repeat(PROGRESS_WIDTH.saturating_sub(filled))
        );
        println!();
        println!(
            "{}  {}  {}  {}",
            frame.counter.bold(),
            bar.dimmed(),
            frame.timer.dimmed(),
            frame.theme.dimmed()
        );
        for block in &frame.blocks {
            print_fragment(block, 0);
        }
        if frame.panel_visible {
            println!("{}", "slides:".bold());
            for entry in &frame.nav {
                let marker = if entry.current { ">" } else { " " };
                let label = match entry.kind {
                    NavKind::Heading(_) | NavKind::Title => entry.title.bold().to_string(),
                    _ => entry.title.clone(),
                };
                println!("  {marker} {label}");
            }
        }
        if let Some(ref notes) = frame.notes {
            println!("{}", "notes:".bold());
            for line in notes.lines() {
                println!("  {}", line.italic());
            }
        }
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
    }

    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }
}

fn print_fragment(fragment: &Fragment, depth: usize) {
    let indent = "  ".repeat(depth);
    let text = fragment.text.trim();
    if !text.is_empty() {
        match fragment.tag.as_str() {
            "h1" | "h2" | "h3" => println!("{indent}{}", text.bold()),
            "blockquote" => println!("{indent}{}", text.italic()),
            _ => println!("{indent}{text}"),
        }
    }
    for child in &fragment.children {
        print_fragment(child, depth + 1);
    }
}
