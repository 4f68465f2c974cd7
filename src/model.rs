//! Data model for parsed documentation comments.
//!
//! Matches the JSON records emitted by documentation.js-style comment parsers.
//! Markdown fields may be plain text or the parser's mdast trees.
//! `isInternal`, `constructor` and `namespacePath` are derived by the
//! pipeline; everything else is read as-is.

use serde::{Deserialize, Serialize};

/// A single documented API element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Kind::is_unset")]
    pub kind: Kind,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Markdown>,
    /// Fully qualified display name, e.g. `Widget.render`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Raw annotation tags in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<TypeExpr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Members>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<ReturnDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    /// Default value text (parameters only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Markdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(default)]
    pub is_internal: bool,
    /// Instance member promoted out of `members.instance`
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Box<Comment>>,
    #[serde(default)]
    pub context: CommentContext,
    #[serde(default, skip_deserializing)]
    pub namespace_path: String,
}

impl Comment {
    pub fn new(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Name used for anchors and link resolution.
    pub fn display_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(&self.name)
    }

    pub fn has_tag(&self, title: &str) -> bool {
        self.tags.iter().any(|tag| tag.title == title)
    }

    /// Every structurally nested comment one level down: params, properties,
    /// then each member group in slot order.
    pub fn nested(&self) -> impl Iterator<Item = &Comment> + '_ {
        let members = self.members.iter().flat_map(Members::groups).flatten();
        self.params
            .iter()
            .chain(self.properties.iter())
            .chain(members)
    }

    /// Mutable counterpart of [`Comment::nested`].
    pub fn nested_mut(&mut self) -> impl Iterator<Item = &mut Comment> + '_ {
        let members = self
            .members
            .iter_mut()
            .flat_map(Members::groups_mut)
            .flatten();
        self.params
            .iter_mut()
            .chain(self.properties.iter_mut())
            .chain(members)
    }
}

/// Comment kind. Only a handful of kinds change behavior; the rest are
/// carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    Function,
    Class,
    Typedef,
    Note,
    Other(String),
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Function => "function",
            Kind::Class => "class",
            Kind::Typedef => "typedef",
            Kind::Note => "note",
            Kind::Other(kind) => kind,
        }
    }

    fn is_unset(&self) -> bool {
        matches!(self, Kind::Other(kind) if kind.is_empty())
    }
}

impl Default for Kind {
    fn default() -> Self {
        Kind::Other(String::new())
    }
}

impl From<String> for Kind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "function" => Kind::Function,
            "class" => Kind::Class,
            "typedef" => Kind::Typedef,
            "note" => Kind::Note,
            _ => Kind::Other(kind),
        }
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

/// A raw annotation directive, e.g. `@type {string}` or `@internal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<TypeExpr>,
}

impl Tag {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Doctrine-style type expression AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TypeExpr {
    NameExpression {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    TypeApplication {
        expression: Box<TypeExpr>,
        #[serde(default)]
        applications: Vec<TypeExpr>,
    },
    UnionType {
        #[serde(default)]
        elements: Vec<TypeExpr>,
    },
    ArrayType {
        #[serde(default)]
        elements: Vec<TypeExpr>,
    },
    RecordType {
        #[serde(default)]
        fields: Vec<TypeExpr>,
    },
    FieldType {
        #[serde(default)]
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<TypeExpr>>,
    },
    FunctionType {
        #[serde(default)]
        params: Vec<TypeExpr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Box<TypeExpr>>,
    },
    OptionalType {
        expression: Box<TypeExpr>,
    },
    NullableType {
        expression: Box<TypeExpr>,
    },
    NonNullableType {
        expression: Box<TypeExpr>,
    },
    RestType {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<Box<TypeExpr>>,
    },
    StringLiteralType {
        #[serde(default)]
        value: String,
    },
    BooleanLiteralType {
        #[serde(default)]
        value: bool,
    },
    NumericLiteralType {
        value: serde_json::Number,
    },
    AllLiteral,
    NullLiteral,
    UndefinedLiteral,
    VoidLiteral,
    #[serde(other)]
    Unknown,
}

impl TypeExpr {
    pub fn name(name: impl Into<String>) -> Self {
        TypeExpr::NameExpression {
            name: Some(name.into()),
        }
    }

    /// The referenced name, for plain name expressions.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TypeExpr::NameExpression { name } => name.as_deref(),
            _ => None,
        }
    }
}

/// Markdown as either source text or an already-parsed mdast tree, which is
/// what documentation.js emits for descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Markdown {
    Text(String),
    Tree(MdNode),
}

impl From<&str> for Markdown {
    fn from(text: &str) -> Self {
        Markdown::Text(text.to_string())
    }
}

impl From<String> for Markdown {
    fn from(text: String) -> Self {
        Markdown::Text(text)
    }
}

/// One mdast node. Only the fields the HTML conversion reads are kept;
/// positions and other parser data are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MdNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MdNode>,
    /// Literal content of `text`, `inlineCode`, `code` and `html` nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Heading level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
}

impl MdNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new("text")
        }
    }

    pub fn with_children(kind: impl Into<String>, children: Vec<MdNode>) -> Self {
        Self {
            children,
            ..Self::new(kind)
        }
    }
}

/// Member groups of a class, namespace or module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Members {
    #[serde(default)]
    pub global: Vec<Comment>,
    #[serde(default)]
    pub inner: Vec<Comment>,
    #[serde(default)]
    pub instance: Vec<Comment>,
    #[serde(default)]
    pub events: Vec<Comment>,
    #[serde(default, rename = "static")]
    pub static_members: Vec<Comment>,
}

impl Members {
    pub fn groups(&self) -> [&Vec<Comment>; 5] {
        [
            &self.global,
            &self.inner,
            &self.instance,
            &self.events,
            &self.static_members,
        ]
    }

    pub fn groups_mut(&mut self) -> [&mut Vec<Comment>; 5] {
        [
            &mut self.global,
            &mut self.inner,
            &mut self.instance,
            &mut self.events,
            &mut self.static_members,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.groups().iter().all(|group| group.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnDoc {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<TypeExpr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Markdown>,
}

/// `@example` block: code plus optional markdown caption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Markdown>,
}

/// Where the comment was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentContext {
    /// Absolute source file path
    #[serde(default)]
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_file: Option<String>,
    /// Parser-specific extras (line ranges, code), passed through
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_documentation_record() {
        let json = r#"{
            "kind": "class",
            "name": "Widget",
            "tags": [{"title": "internal"}, {"title": "type", "description": "Foo"}],
            "members": {"instance": [{"name": "constructor", "kind": "function"}]},
            "context": {"file": "/project/src/ui/widget.js", "loc": {"start": 1}}
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.kind, Kind::Class);
        assert_eq!(comment.tags.len(), 2);
        assert_eq!(comment.tags[1].description.as_deref(), Some("Foo"));
        let members = comment.members.as_ref().unwrap();
        assert_eq!(members.instance[0].name, "constructor");
        assert!(members.static_members.is_empty());
        assert_eq!(comment.context.file, "/project/src/ui/widget.js");
        assert!(comment.context.extra.contains_key("loc"));
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let comment: Comment = serde_json::from_str(r#"{"kind": "mixin", "name": "M"}"#).unwrap();
        assert_eq!(comment.kind, Kind::Other("mixin".to_string()));
        let back = serde_json::to_value(&comment).unwrap();
        assert_eq!(back["kind"], "mixin");
    }

    #[test]
    fn unknown_type_expression_is_tolerated() {
        let ty: TypeExpr = serde_json::from_str(r#"{"type": "SomethingNew"}"#).unwrap();
        assert_eq!(ty, TypeExpr::Unknown);
    }

    #[test]
    fn type_expression_tree() {
        let json = r#"{
            "type": "TypeApplication",
            "expression": {"type": "NameExpression", "name": "Array"},
            "applications": [{"type": "NameExpression", "name": "string"}]
        }"#;
        let ty: TypeExpr = serde_json::from_str(json).unwrap();
        match ty {
            TypeExpr::TypeApplication {
                expression,
                applications,
            } => {
                assert_eq!(expression.as_name(), Some("Array"));
                assert_eq!(applications[0].as_name(), Some("string"));
            }
            other => panic!("unexpected type: {:?}", other),
        }
    }

    #[test]
    fn mdast_description_is_accepted() {
        let json = r#"{
            "name": "mount",
            "description": {
                "type": "root",
                "children": [{
                    "type": "paragraph",
                    "children": [
                        {"type": "text", "value": "Attach a "},
                        {"type": "strong", "children": [{"type": "text", "value": "widget"}]}
                    ],
                    "position": {"start": {"line": 1, "column": 1}}
                }]
            },
            "returns": [{"description": {"type": "root", "children": []}}],
            "examples": [{"description": "mount(w)", "caption": "Basic"}]
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        match comment.description {
            Some(Markdown::Tree(ref root)) => {
                assert_eq!(root.kind, "root");
                let paragraph = &root.children[0];
                assert_eq!(paragraph.kind, "paragraph");
                assert_eq!(paragraph.children[1].children[0].value.as_deref(), Some("widget"));
            }
            ref other => panic!("unexpected description: {:?}", other),
        }
        assert!(matches!(comment.returns[0].description, Some(Markdown::Tree(_))));
        assert_eq!(comment.examples[0].caption, Some(Markdown::from("Basic")));
    }

    #[test]
    fn incomplete_literal_types_degrade() {
        let field: TypeExpr = serde_json::from_str(r#"{"type": "FieldType"}"#).unwrap();
        assert_eq!(
            field,
            TypeExpr::FieldType {
                key: String::new(),
                value: None
            }
        );
        let literal: TypeExpr = serde_json::from_str(r#"{"type": "StringLiteralType"}"#).unwrap();
        assert_eq!(
            literal,
            TypeExpr::StringLiteralType {
                value: String::new()
            }
        );
        let boolean: TypeExpr =
            serde_json::from_str(r#"{"type": "BooleanLiteralType", "value": true}"#).unwrap();
        assert_eq!(boolean, TypeExpr::BooleanLiteralType { value: true });
    }

    #[test]
    fn derived_fields_ignored_on_input() {
        let json = r#"{"name": "x", "namespacePath": "a/b", "constructor": {"name": "y"}}"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.namespace_path, "");
        assert!(comment.constructor.is_none());
    }

    #[test]
    fn nested_visits_all_slots() {
        let mut comment = Comment::new(Kind::Class, "Widget");
        comment.params.push(Comment::new(Kind::default(), "a"));
        comment.properties.push(Comment::new(Kind::default(), "b"));
        comment.members = Some(Members {
            inner: vec![Comment::new(Kind::Function, "c")],
            static_members: vec![Comment::new(Kind::Function, "d")],
            ..Default::default()
        });
        let names: Vec<&str> = comment.nested().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert_eq!(comment.nested_mut().count(), 4);
    }
}
