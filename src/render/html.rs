//! HTML renderer — single page with a namespace sidebar and one section per
//! documented item.

use crate::format::{html_escape, is_function, slug, Helpers};
use crate::model::{Comment, Kind};
use crate::pipeline::RenderContext;
use crate::render::Renderer;
use crate::tree::TreeNode;
use anyhow::Result;

pub struct HtmlRenderer;

/// Stylesheet path relative to the page.
pub const STYLESHEET_HREF: &str = "assets/style.css";

impl Renderer for HtmlRenderer {
    fn render(&self, ctx: &RenderContext) -> Result<String> {
        let mut out = String::new();
        let title = ctx.config.title();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", html_escape(&title)));
        out.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            STYLESHEET_HREF
        ));
        out.push_str("</head>\n<body>\n");

        // Sidebar
        out.push_str("<nav class=\"sidebar\">\n");
        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&title)));
        render_sidebar_namespace(&mut out, ctx, ctx.tree.root());
        out.push_str("</nav>\n");

        // Sections
        out.push_str("<main class=\"content\">\n");
        for doc in ctx.docs {
            if !is_visible(ctx, doc) {
                continue;
            }
            match doc.kind {
                Kind::Note => render_note(&mut out, &ctx.helpers, doc),
                _ => render_section(&mut out, ctx, doc),
            }
        }
        out.push_str("</main>\n</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn is_visible(ctx: &RenderContext, comment: &Comment) -> bool {
    ctx.config.show_internal || !comment.is_internal
}

fn anchor(comment: &Comment) -> String {
    slug(comment.display_namespace())
}

fn render_sidebar_namespace(out: &mut String, ctx: &RenderContext, node: &TreeNode<&Comment>) {
    out.push_str("<ul>\n");
    for item in node.items() {
        if !is_visible(ctx, item) {
            continue;
        }
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>\n",
            html_escape(&anchor(item)),
            html_escape(&item.name)
        ));
    }
    for child in node.children().filter(|child| has_visible_items(ctx, child)) {
        out.push_str(&format!(
            "<li class=\"namespace\" data-path=\"{}\"><span>{}</span>\n",
            html_escape(child.path()),
            html_escape(child.name())
        ));
        render_sidebar_namespace(out, ctx, child);
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

/// Whether the subtree under `node` holds anything to list.
fn has_visible_items(ctx: &RenderContext, node: &TreeNode<&Comment>) -> bool {
    node.items().iter().any(|item| is_visible(ctx, item))
        || node.children().any(|child| has_visible_items(ctx, child))
}

fn render_note(out: &mut String, helpers: &Helpers, note: &Comment) {
    out.push_str(&format!(
        "<div class=\"note\" id=\"{}\">\n<h2>{}</h2>\n",
        html_escape(&anchor(note)),
        html_escape(&note.name)
    ));
    if let Some(ref desc) = note.description {
        out.push_str(&helpers.md(desc, false));
    }
    out.push_str("</div>\n");
}

fn render_section(out: &mut String, ctx: &RenderContext, doc: &Comment) {
    let h = &ctx.helpers;

    out.push_str(&format!(
        "<section class=\"doc\" id=\"{}\">\n",
        html_escape(&anchor(doc))
    ));

    // Heading with kind and internal badges
    out.push_str(&format!("<h3>{}", html_escape(&doc.name)));
    let kind = doc.kind.as_str();
    if !kind.is_empty() {
        out.push_str(&format!(
            " <span class=\"tag tag-kind\">{}</span>",
            html_escape(kind)
        ));
    }
    if doc.is_internal {
        out.push_str(" <span class=\"tag tag-internal\">internal</span>");
    }
    out.push_str("</h3>\n");

    if doc.kind == Kind::Class || is_function(doc) {
        out.push_str(&format!(
            "<div class=\"signature\"><code>{}</code></div>\n",
            h.signature(doc)
        ));
    } else if let Some(ref ty) = doc.type_expr {
        out.push_str(&format!(
            "<div class=\"type\">Type: <code>{}</code></div>\n",
            h.format_type(ty)
        ));
    }

    if let Some(ref deprecated) = doc.deprecated {
        out.push_str(&format!(
            "<div class=\"deprecated\"><strong>Deprecated:</strong> {}</div>\n",
            h.md(deprecated, true)
        ));
    }

    if let Some(ref desc) = doc.description {
        out.push_str(&h.md(desc, false));
    }

    if let Some(ref since) = doc.since {
        out.push_str(&format!(
            "<p class=\"since\">Since {}</p>\n",
            html_escape(since)
        ));
    }

    if !doc.params.is_empty() {
        out.push_str("<h4>Parameters</h4>\n");
        render_params(out, h, &doc.params);
    }

    if !doc.properties.is_empty() {
        out.push_str("<h4>Properties</h4>\n");
        render_params(out, h, &doc.properties);
    }

    if !doc.returns.is_empty() {
        out.push_str("<h4>Returns</h4>\n<ul class=\"returns\">\n");
        for ret in &doc.returns {
            let ty = ret
                .type_expr
                .as_ref()
                .map(|ty| h.format_type(ty))
                .unwrap_or_default();
            out.push_str(&format!("<li><code>{}</code>", ty));
            if let Some(ref desc) = ret.description {
                out.push_str(&format!(": {}", h.md(desc, true)));
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
    }

    if !doc.examples.is_empty() {
        out.push_str("<h4>Examples</h4>\n");
        for example in &doc.examples {
            if let Some(ref caption) = example.caption {
                out.push_str(&format!(
                    "<p class=\"caption\">{}</p>\n",
                    h.md(caption, true)
                ));
            }
            out.push_str(&h.highlight(&example.description));
            out.push('\n');
        }
    }

    if let Some(ref members) = doc.members {
        let groups = [
            ("Static Members", &members.static_members),
            ("Instance Members", &members.instance),
            ("Events", &members.events),
            ("Inner Members", &members.inner),
            ("Global Members", &members.global),
        ];
        for (title, group) in groups {
            render_section_list(out, ctx, title, group);
        }
    }

    out.push_str("</section>\n");
}

/// Parameter or property list; nested properties become nested lists.
fn render_params(out: &mut String, h: &Helpers, params: &[Comment]) {
    out.push_str("<ul class=\"params\">\n");
    for param in params {
        out.push_str(&format!(
            "<li><code>{}</code>",
            html_escape(&param.name)
        ));
        if let Some(ref ty) = param.type_expr {
            out.push_str(&format!(" <code class=\"type\">{}</code>", h.format_type(ty)));
        }
        if let Some(ref default) = param.default {
            out.push_str(&format!(
                " <span class=\"default\">(default <code>{}</code>)</span>",
                html_escape(default)
            ));
        }
        if let Some(ref desc) = param.description {
            out.push_str(&format!(": {}", h.md(desc, true)));
        }
        if !param.properties.is_empty() {
            out.push('\n');
            render_params(out, h, &param.properties);
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

/// One member group, listed by short signature.
fn render_section_list(out: &mut String, ctx: &RenderContext, title: &str, members: &[Comment]) {
    let visible: Vec<&Comment> = members.iter().filter(|m| is_visible(ctx, m)).collect();
    if visible.is_empty() {
        return;
    }
    let h = &ctx.helpers;
    out.push_str(&format!("<h4>{}</h4>\n<dl class=\"members\">\n", title));
    for member in visible {
        out.push_str(&format!(
            "<dt id=\"{}\"><code>{}</code></dt>\n",
            html_escape(&anchor(member)),
            h.short_signature(member)
        ));
        if let Some(ref desc) = member.description {
            out.push_str(&format!("<dd>{}</dd>\n", h.md(desc, true)));
        }
    }
    out.push_str("</dl>\n");
}
