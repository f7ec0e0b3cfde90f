//! Decides which nodes count as presentable blocks and which mark slide breaks.

use crate::document::{NodeId, PageSnapshot};

/// A block takes part in rendering only if it currently occupies space.
/// Layout state changes between scans, so this is evaluated fresh every time.
pub fn is_visible(snapshot: &PageSnapshot, id: NodeId) -> bool {
    let node = snapshot.node(id);
    node.width >= 1.0 && node.height >= 1.0 && node.display != "none" && node.visibility != "hidden"
}

/// A block is a slide break if it contains a rule element or an explicit
/// separator role, or if its entire trimmed text is three or more dashes.
/// Two dashes are content, not a break.
pub fn is_separator_block(snapshot: &PageSnapshot, id: NodeId) -> bool {
    for n in snapshot.descendants(id) {
        let node = snapshot.node(n);
        if node.tag == "hr" || node.role.as_deref() == Some("separator") {
            return true;
        }
    }
    is_dash_run(snapshot.inner_text(id).trim())
}

fn is_dash_run(text: &str) -> bool {
    text.len() >= 3 && text.chars().all(|c| c == '-')
}

/// All outermost tagged blocks under `root`, in document order, visible ones
/// only. A block nested inside another tagged block is excluded no matter how
/// deep, and regardless of the outer block's visibility.
pub fn collect_top_level_blocks(snapshot: &PageSnapshot, root: NodeId) -> Vec<NodeId> {
    let in_root: std::collections::HashSet<NodeId> = snapshot
        .subtree(root)
        .into_iter()
        .filter(|&n| snapshot.node(n).block_id.is_some())
        .collect();
    let mut top: Vec<NodeId> = Vec::new();
    for n in snapshot.subtree(root) {
        if snapshot.node(n).block_id.is_none() {
            continue;
        }
        let nested = snapshot
            .block_ancestor(n)
            .is_some_and(|a| in_root.contains(&a));
        if !nested && is_visible(snapshot, n) {
            top.push(n);
        }
    }
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::loader::from_yaml;

    fn snap(yaml: &str) -> PageSnapshot {
        from_yaml(yaml).unwrap()
    }

    fn first_block(snapshot: &PageSnapshot) -> NodeId {
        let body = snapshot.body().unwrap();
        *snapshot
            .subtree(body)
            .iter()
            .find(|&&n| snapshot.node(n).block_id.is_some())
            .unwrap()
    }

    #[test]
    fn test_separator_rule_element() {
        let s = snap("body:\n  - block: b\n    children:\n      - tag: hr");
        assert!(is_separator_block(&s, first_block(&s)));
    }

    #[test]
    fn test_separator_role() {
        let s = snap("body:\n  - block: b\n    children:\n      - role: separator");
        assert!(is_separator_block(&s, first_block(&s)));
    }

    #[test]
    fn test_separator_three_dashes() {
        let s = snap("body:\n  - block: b\n    text: '---'");
        assert!(is_separator_block(&s, first_block(&s)));
    }

    #[test]
    fn test_separator_four_dashes() {
        let s = snap("body:\n  - block: b\n    text: '  ----  '");
        assert!(is_separator_block(&s, first_block(&s)));
    }

    #[test]
    fn test_two_dashes_are_content() {
        let s = snap("body:\n  - block: b\n    text: '--'");
        assert!(!is_separator_block(&s, first_block(&s)));
    }

    #[test]
    fn test_dashes_with_other_text_are_content() {
        let s = snap("body:\n  - block: b\n    text: '-- -'");
        assert!(!is_separator_block(&s, first_block(&s)));
        let s = snap("body:\n  - block: b\n    text: '--- trailing'");
        assert!(!is_separator_block(&s, first_block(&s)));
    }

    #[test]
    fn test_regular_content_is_not_separator() {
        let s = snap("body:\n  - block: b\n    text: Regular content");
        assert!(!is_separator_block(&s, first_block(&s)));
    }

    #[test]
    fn test_visibility_geometry() {
        let s = snap("body:\n  - block: b\n    width: 0.0");
        assert!(!is_visible(&s, first_block(&s)));
        let s = snap("body:\n  - block: b\n    height: 0.5");
        assert!(!is_visible(&s, first_block(&s)));
    }

    #[test]
    fn test_visibility_style() {
        let s = snap("body:\n  - block: b\n    display: none");
        assert!(!is_visible(&s, first_block(&s)));
        let s = snap("body:\n  - block: b\n    visibility: hidden");
        assert!(!is_visible(&s, first_block(&s)));
        let s = snap("body:\n  - block: b");
        assert!(is_visible(&s, first_block(&s)));
    }

    #[test]
    fn test_collect_excludes_nested_blocks() {
        let s = snap(
            "body:
  - block: outer
    children:
      - children:
          - block: inner
  - block: second",
        );
        let root = s.body().unwrap();
        let ids: Vec<_> = collect_top_level_blocks(&s, root)
            .into_iter()
            .map(|n| s.node(n).block_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["outer", "second"]);
    }

    #[test]
    fn test_collect_excludes_nested_even_when_outer_hidden() {
        let s = snap(
            "body:
  - block: outer
    display: none
    children:
      - block: inner",
        );
        let root = s.body().unwrap();
        assert!(collect_top_level_blocks(&s, root).is_empty());
    }

    #[test]
    fn test_collect_filters_invisible_blocks() {
        let s = snap(
            "body:
  - block: a
  - block: hidden
    visibility: hidden
  - block: b",
        );
        let root = s.body().unwrap();
        let ids: Vec<_> = collect_top_level_blocks(&s, root)
            .into_iter()
            .map(|n| s.node(n).block_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_collect_keeps_document_order() {
        let s = snap("body:\n  - block: one\n  - block: two\n  - block: three");
        let root = s.body().unwrap();
        let ids: Vec<_> = collect_top_level_blocks(&s, root)
            .into_iter()
            .map(|n| s.node(n).block_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["one", "two", "three"]);
    }
}
