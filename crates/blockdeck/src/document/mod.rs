pub mod loader;

use anyhow::Result;

pub use loader::FileSource;

/// Index into the snapshot arena. Only valid for the snapshot it came from;
/// every scan produces a fresh arena with fresh ids.
pub type NodeId = usize;

/// One element of the host page at the moment the snapshot was taken.
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub tag: String,
    pub role: Option<String>,
    pub label: Option<String>,
    /// Stable per-block identifier the host assigns to content blocks.
    pub block_id: Option<String>,
    pub text: String,
    pub width: f32,
    pub height: f32,
    pub display: String,
    pub visibility: String,
    pub editable: bool,
    pub draggable: bool,
    pub spellcheck: bool,
}

/// A point-in-time copy of the host page tree.
///
/// The presentation core never touches the live document; it works off
/// snapshots and re-reads them on every scan.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    title: Option<String>,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl PageSnapshot {
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The document body, if the page has any content at all.
    pub fn body(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_node(&mut self, mut node: Node) -> NodeId {
        let id = self.nodes.len();
        if let Some(parent) = node.parent {
            self.nodes[parent].children.push(id);
        } else if self.root.is_none() {
            self.root = Some(id);
        }
        node.children = Vec::new();
        self.nodes.push(node);
        id
    }

    /// Preorder traversal of `id` and everything below it.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            for &child in self.nodes[n].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Preorder traversal below `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = self.subtree(id);
        out.remove(0);
        out
    }

    /// Concatenated text of the subtree, document order.
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut text = String::new();
        for n in self.subtree(id) {
            text.push_str(&self.nodes[n].text);
        }
        text
    }

    /// Nearest ancestor of `id` carrying a block identifier.
    pub fn block_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.nodes[id].parent;
        while let Some(n) = cur {
            if self.nodes[n].block_id.is_some() {
                return Some(n);
            }
            cur = self.nodes[n].parent;
        }
        None
    }

    /// First level-1 heading with non-empty trimmed text, document order.
    pub fn first_heading(&self) -> Option<String> {
        let root = self.root?;
        for n in self.subtree(root) {
            if self.nodes[n].tag == "h1" {
                let text = self.inner_text(n);
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }
}

/// Find the region that holds the page content.
///
/// Candidates are landmark regions (`role="main"`, a `main` tag, or a
/// "Page content" label); the one containing the most tagged blocks wins,
/// earlier in document order on ties. Pages without landmarks fall back to
/// the body; only an empty snapshot resolves to nothing.
pub fn resolve_page_root(snapshot: &PageSnapshot) -> Option<NodeId> {
    let body = snapshot.body()?;
    let mut best: Option<(NodeId, usize)> = None;
    for id in snapshot.subtree(body) {
        let node = snapshot.node(id);
        let is_candidate = node.role.as_deref() == Some("main")
            || node.tag == "main"
            || node.label.as_deref() == Some("Page content");
        if !is_candidate {
            continue;
        }
        let score = snapshot
            .subtree(id)
            .iter()
            .filter(|&&n| snapshot.node(n).block_id.is_some())
            .count();
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((id, score));
        }
    }
    Some(best.map(|(id, _)| id).unwrap_or(body))
}

/// Capability to observe the host document. Each call yields a fresh
/// snapshot of the current page state.
pub trait SlideSource {
    fn snapshot(&self) -> Result<PageSnapshot>;
}
