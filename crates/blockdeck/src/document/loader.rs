//! YAML page descriptions for file-backed documents and test fixtures.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{Node, NodeId, PageSnapshot, SlideSource};

#[derive(Debug, Clone, Deserialize)]
pub struct PageFile {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Vec<NodeFile>,
}

/// One node of the page tree as written in YAML. Everything defaults to a
/// plain visible `div` so fixtures only state what matters.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeFile {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_display")]
    pub display: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub draggable: bool,
    #[serde(default)]
    pub spellcheck: bool,
    #[serde(default)]
    pub children: Vec<NodeFile>,
}

fn default_tag() -> String {
    "div".to_string()
}

fn default_width() -> f32 {
    800.0
}

fn default_height() -> f32 {
    24.0
}

fn default_display() -> String {
    "block".to_string()
}

fn default_visibility() -> String {
    "visible".to_string()
}

pub fn from_yaml(yaml: &str) -> Result<PageSnapshot> {
    let page: PageFile = serde_yaml::from_str(yaml).context("invalid page description")?;
    Ok(build(page))
}

fn build(page: PageFile) -> PageSnapshot {
    let mut snapshot = PageSnapshot::new(page.title);
    let body = snapshot.push_node(Node {
        parent: None,
        children: Vec::new(),
        tag: "body".to_string(),
        role: None,
        label: None,
        block_id: None,
        text: String::new(),
        width: default_width(),
        height: default_height(),
        display: default_display(),
        visibility: default_visibility(),
        editable: false,
        draggable: false,
        spellcheck: false,
    });
    for child in page.body {
        push_tree(&mut snapshot, body, child);
    }
    snapshot
}

fn push_tree(snapshot: &mut PageSnapshot, parent: NodeId, file: NodeFile) {
    let id = snapshot.push_node(Node {
        parent: Some(parent),
        children: Vec::new(),
        tag: file.tag,
        role: file.role,
        label: file.label,
        block_id: file.block,
        text: file.text,
        width: file.width,
        height: file.height,
        display: file.display,
        visibility: file.visibility,
        editable: file.editable,
        draggable: file.draggable,
        spellcheck: file.spellcheck,
    });
    for child in file.children {
        push_tree(snapshot, id, child);
    }
}

/// A document backed by a YAML file on disk; re-read on every scan, so an
/// edit to the file shows up at the next rescan.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SlideSource for FileSource {
    fn snapshot(&self) -> Result<PageSnapshot> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        from_yaml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_make_visible_divs() {
        let snap = from_yaml("body:\n  - block: b1\n    text: Hi").unwrap();
        let body = snap.body().unwrap();
        let node = snap.node(snap.node(body).children[0]);
        assert_eq!(node.tag, "div");
        assert_eq!(node.display, "block");
        assert_eq!(node.visibility, "visible");
        assert!(node.width >= 1.0 && node.height >= 1.0);
        assert_eq!(node.block_id.as_deref(), Some("b1"));
    }

    #[test]
    fn test_nested_children_keep_document_order() {
        let snap = from_yaml(
            "body:
  - block: a
  - block: b
    children:
      - block: c",
        )
        .unwrap();
        let body = snap.body().unwrap();
        let order: Vec<_> = snap
            .descendants(body)
            .into_iter()
            .filter_map(|n| snap.node(n).block_id.clone())
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(from_yaml("body: [unclosed").is_err());
    }
}
