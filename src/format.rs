//! Formatting helpers handed to renderers: slugs, signatures, type text.
//!
//! Everything returned here except [`slug`] is HTML-safe.

use crate::config::Config;
use crate::link::Linker;
use crate::markdown;
use crate::model::{Comment, Kind, Markdown, TypeExpr};

/// GitHub heading anchor slug.
///
/// - lowercase
/// - drop everything except alphanumerics, space, `-` and `_`
/// - spaces become hyphens
pub fn slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Functions, and typedefs whose type is `Function`.
pub fn is_function(comment: &Comment) -> bool {
    match comment.kind {
        Kind::Function => true,
        Kind::Typedef => comment
            .type_expr
            .as_ref()
            .and_then(TypeExpr::as_name)
            .is_some_and(|name| name == "Function"),
        _ => false,
    }
}

/// Helper set shared by all renderers for one run.
#[derive(Debug, Clone, Default)]
pub struct Helpers {
    linker: Linker,
    highlight_auto: bool,
}

impl Helpers {
    pub fn new(linker: Linker, config: &Config) -> Self {
        Self {
            linker,
            highlight_auto: config.hljs.highlight_auto,
        }
    }

    pub fn linker(&self) -> &Linker {
        &self.linker
    }

    /// Link `text` when it names something resolvable, escape it otherwise.
    pub fn autolink(&self, text: &str) -> String {
        match self.linker.link(text) {
            Some(href) => format!("<a href=\"{}\">{}</a>", html_escape(&href), html_escape(text)),
            None => html_escape(text),
        }
    }

    pub fn format_type(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::NameExpression { name } => name
                .as_deref()
                .map(|name| self.autolink(name))
                .unwrap_or_default(),
            TypeExpr::TypeApplication {
                expression,
                applications,
            } => format!(
                "{}&lt;{}&gt;",
                self.format_type(expression),
                self.format_list(applications, ", ")
            ),
            TypeExpr::UnionType { elements } => {
                format!("({})", self.format_list(elements, " | "))
            }
            TypeExpr::ArrayType { elements } => {
                format!("[{}]", self.format_list(elements, ", "))
            }
            TypeExpr::RecordType { fields } => {
                format!("{{{}}}", self.format_list(fields, ", "))
            }
            TypeExpr::FieldType { key, value } => match value {
                Some(value) => format!("{}: {}", html_escape(key), self.format_type(value)),
                None => html_escape(key),
            },
            TypeExpr::FunctionType { params, result } => {
                let mut out = format!("function ({})", self.format_list(params, ", "));
                if let Some(result) = result {
                    out.push_str(": ");
                    out.push_str(&self.format_type(result));
                }
                out
            }
            TypeExpr::OptionalType { expression } => {
                format!("{}?", self.format_type(expression))
            }
            TypeExpr::NullableType { expression } => {
                format!("?{}", self.format_type(expression))
            }
            TypeExpr::NonNullableType { expression } => {
                format!("!{}", self.format_type(expression))
            }
            TypeExpr::RestType { expression } => match expression {
                Some(expression) => format!("...{}", self.format_type(expression)),
                None => "...".to_string(),
            },
            TypeExpr::StringLiteralType { value } => {
                format!("&quot;{}&quot;", html_escape(value))
            }
            TypeExpr::NumericLiteralType { value } => value.to_string(),
            TypeExpr::BooleanLiteralType { value } => value.to_string(),
            TypeExpr::AllLiteral => "any".to_string(),
            TypeExpr::NullLiteral => "null".to_string(),
            TypeExpr::UndefinedLiteral => "undefined".to_string(),
            TypeExpr::VoidLiteral => "void".to_string(),
            TypeExpr::Unknown => String::new(),
        }
    }

    fn format_list(&self, types: &[TypeExpr], sep: &str) -> String {
        types
            .iter()
            .map(|ty| self.format_type(ty))
            .collect::<Vec<_>>()
            .join(sep)
    }

    fn format_parameter(&self, param: &Comment, short: bool) -> String {
        let name = html_escape(&param.name);
        if short {
            return match (&param.type_expr, &param.default) {
                (Some(TypeExpr::OptionalType { .. }), Some(default)) => {
                    format!("{} = {}", name, html_escape(default))
                }
                (Some(TypeExpr::OptionalType { .. }), None) => format!("{}?", name),
                _ => name,
            };
        }
        let ty = param
            .type_expr
            .as_ref()
            .map(|ty| self.format_type(ty))
            .unwrap_or_default();
        format!("{}: {}", name, ty.replace('\n', ""))
    }

    /// Parenthesized parameter list.
    pub fn parameters(&self, comment: &Comment, short: bool) -> String {
        let params: Vec<String> = comment
            .params
            .iter()
            .map(|param| self.format_parameter(param, short))
            .collect();
        format!("({})", params.join(", "))
    }

    /// `new Name(a, b?)` for classes, `name(a, b?)` for functions, the bare
    /// name otherwise.
    pub fn short_signature(&self, comment: &Comment) -> String {
        let prefix = match comment.kind {
            Kind::Class => "new ",
            _ if is_function(comment) => "",
            _ => return html_escape(&comment.name),
        };
        format!(
            "{}{}{}",
            prefix,
            html_escape(&comment.name),
            self.parameters(comment, true)
        )
    }

    /// Like [`Helpers::short_signature`] but with parameter types and, for
    /// functions, the first return type.
    pub fn signature(&self, comment: &Comment) -> String {
        let prefix = match comment.kind {
            Kind::Class => "new ",
            _ if is_function(comment) => "",
            _ => return html_escape(&comment.name),
        };
        let returns = match comment.returns.first() {
            Some(ret) => format!(
                ": {}",
                ret.type_expr
                    .as_ref()
                    .map(|ty| self.format_type(ty))
                    .unwrap_or_default()
            ),
            None => String::new(),
        };
        format!(
            "{}{}{}{}",
            prefix,
            html_escape(&comment.name),
            self.parameters(comment, false),
            returns
        )
    }

    pub fn md(&self, text: &Markdown, inline: bool) -> String {
        match text {
            Markdown::Text(source) => markdown::render(source, inline),
            Markdown::Tree(root) => markdown::render_tree(root, inline),
        }
    }

    pub fn highlight(&self, code: &str) -> String {
        markdown::highlight(code, self.highlight_auto)
    }
}
