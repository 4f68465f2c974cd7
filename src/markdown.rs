//! Markdown to HTML, plus example-code highlighting.

use crate::format::html_escape;
use crate::model::MdNode;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

// First paragraph wrapper, unwrapped in inline mode
static RE_LEADING_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A<p>(.*?)</p>\n?").unwrap());

/// Render markdown. With `inline`, the leading paragraph is unwrapped so the
/// result can sit inside a list item or table cell.
pub fn render(markdown: &str, inline: bool) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    if inline {
        RE_LEADING_PARAGRAPH
            .replace(&html_output, "$1")
            .into_owned()
    } else {
        html_output
    }
}

/// Render an already-parsed mdast tree. Inline mode splices the children of a
/// leading paragraph into the root.
pub fn render_tree(root: &MdNode, inline: bool) -> String {
    let mut out = String::new();
    match root.children.split_first() {
        Some((first, rest)) if inline && first.kind == "paragraph" => {
            push_nodes(&mut out, &first.children);
            push_nodes(&mut out, rest);
        }
        _ => push_node(&mut out, root),
    }
    out
}

fn push_nodes(out: &mut String, nodes: &[MdNode]) {
    for node in nodes {
        push_node(out, node);
    }
}

fn push_wrapped(out: &mut String, tag: &str, node: &MdNode) {
    out.push_str(&format!("<{}>", tag));
    push_nodes(out, &node.children);
    out.push_str(&format!("</{}>", tag));
}

fn push_node(out: &mut String, node: &MdNode) {
    let value = node.value.as_deref().unwrap_or_default();
    match node.kind.as_str() {
        "text" => out.push_str(&html_escape(value)),
        "html" => out.push_str(value),
        "inlineCode" => out.push_str(&format!("<code>{}</code>", html_escape(value))),
        "code" => {
            match node.lang.as_deref() {
                Some(lang) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    html_escape(lang)
                )),
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&html_escape(value));
            out.push_str("</code></pre>\n");
        }
        "paragraph" => {
            push_wrapped(out, "p", node);
            out.push('\n');
        }
        "emphasis" => push_wrapped(out, "em", node),
        "strong" => push_wrapped(out, "strong", node),
        "delete" => push_wrapped(out, "del", node),
        "heading" => {
            let level = node.depth.unwrap_or(1).clamp(1, 6);
            push_wrapped(out, &format!("h{}", level), node);
            out.push('\n');
        }
        "blockquote" => {
            out.push_str("<blockquote>\n");
            push_nodes(out, &node.children);
            out.push_str("</blockquote>\n");
        }
        "list" => {
            let tag = if node.ordered == Some(true) { "ol" } else { "ul" };
            out.push_str(&format!("<{}>\n", tag));
            push_nodes(out, &node.children);
            out.push_str(&format!("</{}>\n", tag));
        }
        "listItem" => {
            push_wrapped(out, "li", node);
            out.push('\n');
        }
        "link" => {
            out.push_str(&format!(
                "<a href=\"{}\">",
                html_escape(node.url.as_deref().unwrap_or_default())
            ));
            push_nodes(out, &node.children);
            out.push_str("</a>");
        }
        "image" => out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" />",
            html_escape(node.url.as_deref().unwrap_or_default()),
            html_escape(node.alt.as_deref().unwrap_or_default())
        )),
        "thematicBreak" => out.push_str("<hr />\n"),
        "break" => out.push_str("<br />\n"),
        // root and anything unrecognized: contents only
        _ => push_nodes(out, &node.children),
    }
}

/// Capture names from the JavaScript highlights query, in the order we
/// assign CSS classes. The index becomes the `Highlight` id.
const HIGHLIGHT_NAMES: &[&str] = &[
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "function",
    "function.builtin",
    "function.method",
    "keyword",
    "number",
    "operator",
    "property",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "type",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

fn js_config() -> Option<HighlightConfiguration> {
    let mut config = HighlightConfiguration::new(
        tree_sitter_javascript::LANGUAGE.into(),
        "javascript",
        tree_sitter_javascript::HIGHLIGHT_QUERY,
        "", // no injections
        "", // no locals
    )
    .ok()?;
    config.configure(HIGHLIGHT_NAMES);
    Some(config)
}

/// Highlighted inner HTML with `<span class="hl-*">` spans, or `None` when
/// the highlighter fails.
fn highlight_js(code: &str) -> Option<String> {
    let config = js_config()?;
    let mut highlighter = Highlighter::new();
    let events = highlighter
        .highlight(&config, code.as_bytes(), None, |_| None)
        .ok()?;

    let mut out = String::with_capacity(code.len());
    for event in events {
        match event.ok()? {
            HighlightEvent::Source { start, end } => {
                out.push_str(&html_escape(code.get(start..end)?));
            }
            HighlightEvent::HighlightStart(highlight) => {
                let name = HIGHLIGHT_NAMES.get(highlight.0).copied().unwrap_or("none");
                out.push_str(&format!("<span class=\"hl-{}\">", name.replace('.', "-")));
            }
            HighlightEvent::HighlightEnd => out.push_str("</span>"),
        }
    }
    Some(out)
}

/// Whether `code` is JavaScript without syntax errors.
fn parses_as_js(code: &str) -> bool {
    let mut parser = tree_sitter::Parser::new();
    if parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .is_err()
    {
        return false;
    }
    parser
        .parse(code, None)
        .is_some_and(|tree| !tree.root_node().has_error())
}

/// Highlight example code as JavaScript. With `auto`, code that does not
/// parse as JavaScript is shown as plain escaped text instead.
pub fn highlight(code: &str, auto: bool) -> String {
    if auto && !parses_as_js(code) {
        debug!("example is not javascript, leaving it plain");
        return format!("<pre><code>{}</code></pre>", html_escape(code));
    }
    let inner = highlight_js(code).unwrap_or_else(|| html_escape(code));
    format!("<pre><code class=\"language-js\">{}</code></pre>", inner)
}
