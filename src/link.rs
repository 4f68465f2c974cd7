//! Cross-reference link resolution.
//!
//! Lookup order: explicit `paths` from the config, then namespaces of the
//! documented comments (page anchors), then JavaScript built-ins (MDN).

use crate::format::slug;
use crate::model::Comment;
use std::collections::{BTreeMap, HashSet};

const MDN_GLOBALS: &str =
    "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/";

/// Built-in objects that get an MDN link when nothing else matches.
const JS_GLOBALS: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "Boolean",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "Float32Array",
    "Float64Array",
    "Function",
    "Generator",
    "Int8Array",
    "Int16Array",
    "Int32Array",
    "Intl",
    "JSON",
    "Map",
    "Math",
    "Number",
    "Object",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "Uint8Array",
    "Uint8ClampedArray",
    "Uint16Array",
    "Uint32Array",
    "URIError",
    "WeakMap",
    "WeakSet",
];

#[derive(Debug, Clone, Default)]
pub struct Linker {
    paths: BTreeMap<String, String>,
    namespaces: HashSet<String>,
}

impl Linker {
    pub fn new(paths: BTreeMap<String, String>) -> Self {
        Self {
            paths,
            namespaces: HashSet::new(),
        }
    }

    /// Register the namespace of every comment and, recursively, of their
    /// members.
    pub fn with_namespaces(mut self, comments: &[Comment]) -> Self {
        for comment in comments {
            self.collect(comment);
        }
        self
    }

    fn collect(&mut self, comment: &Comment) {
        self.namespaces
            .insert(comment.display_namespace().to_string());
        if let Some(members) = &comment.members {
            for member in members.groups().into_iter().flatten() {
                self.collect(member);
            }
        }
    }

    /// Link target for `name`, if any.
    pub fn link(&self, name: &str) -> Option<String> {
        if let Some(target) = self.paths.get(name) {
            return Some(target.clone());
        }
        if self.namespaces.contains(name) {
            return Some(format!("#{}", slug(name)));
        }
        if JS_GLOBALS.contains(&name) {
            return Some(format!("{}{}", MDN_GLOBALS, name));
        }
        None
    }
}
