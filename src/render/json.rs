//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the whole render context: config, normalized comments and the
//! namespace tree.

use crate::config::Config;
use crate::model::Comment;
use crate::pipeline::RenderContext;
use crate::render::Renderer;
use crate::tree::NamespaceTree;
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonContext<'a, 'c> {
    config: &'a Config,
    docs: &'a [Comment],
    tree: &'a NamespaceTree<&'c Comment>,
}

impl Renderer for JsonRenderer {
    fn render(&self, ctx: &RenderContext) -> Result<String> {
        let view = JsonContext {
            config: ctx.config,
            docs: ctx.docs,
            tree: &ctx.tree,
        };
        let mut out =
            serde_json::to_string_pretty(&view).context("failed to serialize render context")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
