//! Namespace path resolution.
//!
//! A comment's namespace path is the directory of its source file relative to
//! the documentation root, always `/`-separated. Paths are compared
//! lexically; nothing here touches the filesystem.

use std::path::{Component, Path};

/// Separator between namespace path segments.
pub const SEPARATOR: char = '/';

/// A source file located relative to the documentation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// File path relative to the root, e.g. `ui/widget.js`
    pub relative_file: String,
    /// Directory part of `relative_file`; empty at the root
    pub namespace_path: String,
}

/// Resolve `file` against `root`.
///
/// Files outside the root keep their `..` segments; the tree builder treats
/// those as ordinary segment names.
pub fn resolve(root: &Path, file: &Path) -> ResolvedPath {
    let relative_file = relative_path(root, file);
    let namespace_path = match relative_file.rsplit_once(SEPARATOR) {
        Some((dir, _)) => dir,
        None => "",
    };
    let namespace_path = namespace_path
        .strip_prefix(SEPARATOR)
        .unwrap_or(namespace_path)
        .to_string();

    ResolvedPath {
        relative_file,
        namespace_path,
    }
}

/// Lexical relative path from directory `from` to `to`, `/`-joined.
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from = segments(from);
    let to = segments(to);

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    // Different roots (another drive): nothing to be relative to
    if common == 0 && to.first().is_some_and(|s| s.is_empty()) {
        return to.join("/");
    }

    let mut parts: Vec<&str> = vec![".."; from.len() - common];
    parts.extend(to[common..].iter().map(String::as_str));
    parts.join("/")
}

/// Normalized path segments. The filesystem root is the empty segment so a
/// joined absolute path keeps its leading separator.
fn segments(path: &Path) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                out.push(prefix.as_os_str().to_string_lossy().to_string());
            }
            Component::RootDir => {
                if out.is_empty() {
                    out.push(String::new());
                }
            }
            Component::CurDir => {}
            Component::ParentDir => match out.last().map(String::as_str) {
                // `/..` stays at the root
                Some("") => {}
                Some("..") | None => out.push("..".to_string()),
                Some(_) => {
                    out.pop();
                }
            },
            Component::Normal(name) => out.push(name.to_string_lossy().to_string()),
        }
    }
    out
}
