use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use crate::deck;
use crate::document::loader::FileSource;
use crate::document::{SlideSource, resolve_page_root};
use crate::render::{self, NavKind};
use crate::theme::Theme;

/// Segment the document once and print one line per slide.
pub fn run(file: &Path) -> Result<()> {
    let source = FileSource::new(file);
    let snapshot = source.snapshot()?;
    let Some(root) = resolve_page_root(&snapshot) else {
        anyhow::bail!("No presentable content in {}", file.display());
    };
    let deck = deck::build_deck(&snapshot, root);
    let frame = render::compose_frame(
        &snapshot,
        &deck,
        0,
        &Theme::light(),
        true,
        false,
        Duration::ZERO,
    );

    println!("{}", deck::document_title(&snapshot).bold());
    for (i, entry) in frame.nav.iter().enumerate() {
        let title = match entry.kind {
            NavKind::Title | NavKind::Heading(_) => entry.title.bold().to_string(),
            _ => entry.title.clone(),
        };
        println!("{:>3}. {title}", i + 1);
    }
    println!("{}", format!("{} slides", deck.len()).dimmed());
    Ok(())
}
