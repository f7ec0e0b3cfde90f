//! Split an ordered block list into slide groups at separator blocks.

use crate::deck::classify;
use crate::document::{NodeId, PageSnapshot};

/// Fold the block sequence left to right: content blocks accumulate, a
/// separator seals the accumulated group and is itself discarded. A trailing
/// group is sealed at the end. Groups are never empty; consecutive separators
/// and separators at either end produce nothing.
pub fn split(snapshot: &PageSnapshot, blocks: &[NodeId]) -> Vec<Vec<NodeId>> {
    let mut groups: Vec<Vec<NodeId>> = Vec::new();
    let mut current: Vec<NodeId> = Vec::new();
    for &block in blocks {
        if classify::is_separator_block(snapshot, block) {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(block);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}
