//! The generation pipeline: resolve namespace paths, repair comments, hoist
//! constructors, then group everything into the namespace tree.

use crate::config::Config;
use crate::format::Helpers;
use crate::link::Linker;
use crate::model::Comment;
use crate::namespace;
use crate::normalize;
use crate::tree::{NamespaceTree, TreeBuilder};
use std::path::Path;
use tracing::debug;

/// Everything a renderer gets. Built once, never mutated afterwards.
pub struct RenderContext<'a> {
    /// All comments, normalized, in input order
    pub docs: &'a [Comment],
    pub tree: NamespaceTree<&'a Comment>,
    pub config: &'a Config,
    pub helpers: Helpers,
}

/// What the in-place pass changed, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PrepareStats {
    pub comments: usize,
    pub internal: usize,
    pub constructors: usize,
}

/// Resolve, normalize and hoist constructors for every top-level comment,
/// in input order. Relative (or missing) source paths are taken from `cwd`.
pub fn prepare(comments: &mut [Comment], root: &Path, cwd: &Path) -> PrepareStats {
    let mut stats = PrepareStats::default();
    for comment in comments.iter_mut() {
        let file = cwd.join(&comment.context.file);
        let resolved = namespace::resolve(root, &file);
        comment.context.relative_file = Some(resolved.relative_file);
        comment.namespace_path = resolved.namespace_path;

        normalize::normalize(comment);
        if normalize::extract_constructor(comment) {
            stats.constructors += 1;
        }

        stats.comments += 1;
        if comment.is_internal {
            stats.internal += 1;
        }
    }
    stats
}

/// Group comments by namespace path, preserving input order within a node.
pub fn build_tree(comments: &[Comment]) -> NamespaceTree<&Comment> {
    let mut builder = TreeBuilder::new();
    for comment in comments {
        builder.insert(&comment.namespace_path, comment);
    }
    builder.finish()
}

/// Run the whole pipeline. `cwd` anchors relative `input` roots.
pub fn run<'a>(comments: &'a mut [Comment], config: &'a Config, cwd: &Path) -> RenderContext<'a> {
    let root = config.resolution_root(cwd);
    let stats = prepare(comments, &root, cwd);
    debug!(
        root = %root.display(),
        comments = stats.comments,
        internal = stats.internal,
        constructors = stats.constructors,
        "normalized comments"
    );

    let docs: &'a [Comment] = comments;
    let tree = build_tree(docs);
    debug!(nodes = tree.node_count(), "built namespace tree");

    let linker = Linker::new(config.paths.clone()).with_namespaces(docs);
    RenderContext {
        docs,
        tree,
        config,
        helpers: Helpers::new(linker, config),
    }
}
