//! Presentation-safe copies of live blocks.

use crate::document::{NodeId, PageSnapshot};

/// An owned, display-only copy of a block subtree. Editing affordances
/// (contenteditable, draggable, spellcheck) are not carried over, so a
/// painted fragment can never feed interactions back into the live page.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub tag: String,
    pub role: Option<String>,
    pub block_id: Option<String>,
    pub text: String,
    pub children: Vec<Fragment>,
}

impl Fragment {
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }
}

/// Deep-clone a block for display. Interactive menu regions are dropped
/// entirely; the snapshot itself is left untouched.
pub fn sanitize(snapshot: &PageSnapshot, id: NodeId) -> Fragment {
    let node = snapshot.node(id);
    Fragment {
        tag: node.tag.clone(),
        role: node.role.clone(),
        block_id: node.block_id.clone(),
        text: node.text.clone(),
        children: node
            .children
            .iter()
            .filter(|&&child| snapshot.node(child).role.as_deref() != Some("menu"))
            .map(|&child| sanitize(snapshot, child))
            .collect(),
    }
}

/// The synthesized title block: a container holding one level-1 heading.
pub fn title_fragment(title: &str) -> Fragment {
    Fragment {
        tag: "div".to_string(),
        role: None,
        block_id: None,
        text: String::new(),
        children: vec![Fragment {
            tag: "h1".to_string(),
            role: None,
            block_id: None,
            text: title.to_string(),
            children: Vec::new(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::loader::from_yaml;

    #[test]
    fn test_menu_descendants_are_dropped() {
        let snap = from_yaml(
            "body:
  - block: b
    text: Keep
    children:
      - role: menu
        text: Delete me
      - text: ' me'",
        )
        .unwrap();
        let body = snap.body().unwrap();
        let block = snap.node(body).children[0];
        let frag = sanitize(&snap, block);
        assert_eq!(frag.text_content(), "Keep me");
        assert!(frag.children.iter().all(|c| c.role.as_deref() != Some("menu")));
    }

    #[test]
    fn test_nested_menu_removed_with_subtree() {
        let snap = from_yaml(
            "body:
  - block: b
    children:
      - children:
          - role: menu
            children:
              - text: hidden",
        )
        .unwrap();
        let body = snap.body().unwrap();
        let block = snap.node(body).children[0];
        let frag = sanitize(&snap, block);
        assert_eq!(frag.text_content(), "");
    }

    #[test]
    fn test_clone_preserves_structure_and_text() {
        let snap = from_yaml(
            "body:
  - block: b
    editable: true
    draggable: true
    spellcheck: true
    children:
      - tag: h2
        text: Heading
      - text: Body",
        )
        .unwrap();
        let body = snap.body().unwrap();
        let block = snap.node(body).children[0];
        let frag = sanitize(&snap, block);
        assert_eq!(frag.children.len(), 2);
        assert_eq!(frag.children[0].tag, "h2");
        assert_eq!(frag.text_content(), "HeadingBody");
        // The live node keeps its affordances; only the copy is inert.
        assert!(snap.node(block).editable);
    }

    #[test]
    fn test_title_fragment_shape() {
        let frag = title_fragment("Launch Plan");
        assert_eq!(frag.children.len(), 1);
        assert_eq!(frag.children[0].tag, "h1");
        assert_eq!(frag.children[0].text, "Launch Plan");
    }
}
