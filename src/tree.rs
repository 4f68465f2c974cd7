//! Namespace trie: comments grouped by the segments of their namespace path.
//!
//! Built once per run through [`TreeBuilder::insert`], then frozen into a
//! read-only [`NamespaceTree`]. Children keep insertion order so output is
//! stable for identical input.

use crate::namespace::SEPARATOR;
use indexmap::IndexMap;
use serde::Serialize;

/// One namespace in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode<T> {
    name: String,
    path: String,
    items: Vec<T>,
    children: IndexMap<String, TreeNode<T>>,
}

impl<T> TreeNode<T> {
    fn root() -> Self {
        Self::branch(String::new(), String::new())
    }

    fn branch(name: String, path: String) -> Self {
        Self {
            name,
            path,
            items: Vec::new(),
            children: IndexMap::new(),
        }
    }

    /// Last path segment; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full namespace path; empty for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Items attached directly at this path, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn children(&self) -> impl Iterator<Item = &TreeNode<T>> {
        self.children.values()
    }

    pub fn child(&self, segment: &str) -> Option<&TreeNode<T>> {
        self.children.get(segment)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(TreeNode::node_count).sum::<usize>()
    }
}

/// Append-only construction state for a [`NamespaceTree`].
#[derive(Debug)]
pub struct TreeBuilder<T> {
    root: TreeNode<T>,
}

impl<T> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeBuilder<T> {
    pub fn new() -> Self {
        Self {
            root: TreeNode::root(),
        }
    }

    /// Attach `item` at `namespace_path`, creating missing nodes on the way
    /// down. Returns the node the item landed in.
    ///
    /// Segments are taken literally: `..` or an empty segment between two
    /// separators is just another name.
    pub fn insert(&mut self, namespace_path: &str, item: T) -> &TreeNode<T> {
        let mut node = &mut self.root;
        if !namespace_path.is_empty() {
            for segment in namespace_path.split(SEPARATOR) {
                let path = join_path(&node.path, segment);
                node = node
                    .children
                    .entry(segment.to_string())
                    .or_insert_with(|| TreeNode::branch(segment.to_string(), path));
            }
        }
        node.items.push(item);
        node
    }

    pub fn finish(self) -> NamespaceTree<T> {
        NamespaceTree { root: self.root }
    }
}

impl<T> FromIterator<(String, T)> for NamespaceTree<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut builder = TreeBuilder::new();
        for (path, item) in iter {
            builder.insert(&path, item);
        }
        builder.finish()
    }
}

fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", parent, SEPARATOR, segment)
    }
}

/// A finished namespace tree. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NamespaceTree<T> {
    root: TreeNode<T>,
}

impl<T> NamespaceTree<T> {
    pub fn root(&self) -> &TreeNode<T> {
        &self.root
    }

    /// Look up the node for `path` by walking its segments from the root.
    pub fn find(&self, path: &str) -> Option<&TreeNode<T>> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split(SEPARATOR)
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
