//! Repository tree DTOs.
//!
//! - `ContentEntry`: One item of a GitHub contents-API listing (FileList view)
//! - `RepoNode`: Recursive tree node (FileTree sidebar)
//! - `TreeWalk`: Result of a full walk, nodes plus isolated branch failures
//! - `OpenFile`: File currently shown in the content viewer

use serde::{Deserialize, Serialize};

/// Entry type as reported by the contents API (`type` field).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub size: Option<u64>,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    /// Present iff `kind == Directory`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RepoNode>>,
    /// Only ever set on files, after an explicit content fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl RepoNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            children: None,
            content: None,
        }
    }

    pub fn directory(name: impl Into<String>, path: impl Into<String>, children: Vec<RepoNode>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory,
            children: Some(children),
            content: None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn children(&self) -> &[RepoNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Attach fetched content. Directories never carry content.
    pub fn set_content(&mut self, content: String) -> bool {
        if self.kind == NodeKind::File {
            self.content = Some(content);
            true
        } else {
            false
        }
    }

    /// Depth-first lookup by repository path.
    pub fn find_mut<'a>(nodes: &'a mut [RepoNode], path: &str) -> Option<&'a mut RepoNode> {
        for node in nodes.iter_mut() {
            if node.path == path {
                return Some(node);
            }
            let prefix = format!("{}/", node.path);
            if path.starts_with(&prefix) {
                return node
                    .children
                    .as_mut()
                    .and_then(|children| Self::find_mut(children, path));
            }
        }
        None
    }

    /// (files, directories) counted over the whole subtree.
    pub fn count(nodes: &[RepoNode]) -> (usize, usize) {
        nodes.iter().fold((0, 0), |(files, dirs), node| {
            if node.is_directory() {
                let (f, d) = Self::count(node.children());
                (files + f, dirs + d + 1)
            } else {
                (files + 1, dirs)
            }
        })
    }
}

/// A nested directory whose listing failed; its node is kept with no children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeWalk {
    pub nodes: Vec<RepoNode>,
    pub errors: Vec<BranchError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenFile {
    pub path: String,
    pub content: String,
}

impl OpenFile {
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}
