pub mod classify;
pub mod splitter;

use crate::document::{NodeId, PageSnapshot};

/// Title the host reports for a page nobody has named yet.
const GENERIC_TITLE: &str = "Notion";
/// Suffix the host appends to real page titles.
const TITLE_SUFFIX: &str = " - Notion";
const FALLBACK_TITLE: &str = "Untitled";

/// One unit of slide content: either a reference to a live block in the
/// current snapshot, or the synthesized title block.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title { text: String },
    Node(NodeId),
}

/// An ordered, non-empty group of blocks shown together.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }
}

/// Derive the deck title: the host title unless it is the generic
/// placeholder or absent, else the first level-1 heading, else "Untitled".
pub fn document_title(snapshot: &PageSnapshot) -> String {
    if let Some(raw) = snapshot.title() {
        if !raw.is_empty() && raw != GENERIC_TITLE {
            let stripped = raw.strip_suffix(TITLE_SUFFIX).unwrap_or(raw);
            return stripped.trim().to_string();
        }
    }
    snapshot
        .first_heading()
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Partition the page into slides: a synthesized title slide, then one slide
/// per separator-delimited group of top-level blocks.
pub fn build_slides(snapshot: &PageSnapshot, root: NodeId) -> Deck {
    let mut slides = vec![Slide {
        blocks: vec![Block::Title {
            text: document_title(snapshot),
        }],
    }];
    let blocks = classify::collect_top_level_blocks(snapshot, root);
    for group in splitter::split(snapshot, &blocks) {
        slides.push(Slide {
            blocks: group.into_iter().map(Block::Node).collect(),
        });
    }
    slides.retain(|s| !s.blocks.is_empty());
    Deck { slides }
}

/// `build_slides`, with the degenerate-page fallback: when segmentation
/// yields only the title slide but the page has blocks, show them all on one
/// slide, separator blocks included.
pub fn build_deck(snapshot: &PageSnapshot, root: NodeId) -> Deck {
    let mut deck = build_slides(snapshot, root);
    if deck.len() <= 1 {
        let all = classify::collect_top_level_blocks(snapshot, root);
        if !all.is_empty() {
            deck.slides.push(Slide {
                blocks: all.into_iter().map(Block::Node).collect(),
            });
        }
    }
    deck
}
