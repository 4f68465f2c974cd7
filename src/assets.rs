//! Static assets shipped next to the rendered page.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Built-in stylesheet referenced by the HTML renderer.
pub const STYLESHEET: &str = include_str!("../assets/style.css");

/// Output subdirectory holding all assets.
pub const ASSET_DIR: &str = "assets";

/// Write the built-in stylesheet, then copy every file under `extra` (if
/// given) into `<output_dir>/assets`, keeping relative paths. Returns the
/// number of files written.
pub fn write_assets(output_dir: &Path, extra: Option<&Path>) -> Result<usize> {
    let target = output_dir.join(ASSET_DIR);
    fs::create_dir_all(&target)
        .with_context(|| format!("failed to create asset directory: {}", target.display()))?;

    let stylesheet = target.join("style.css");
    fs::write(&stylesheet, STYLESHEET)
        .with_context(|| format!("failed to write {}", stylesheet.display()))?;

    let mut written = 1;
    if let Some(source) = extra {
        written += copy_tree(source, &target)?;
    }
    Ok(written)
}

fn copy_tree(source: &Path, target: &Path) -> Result<usize> {
    if !source.is_dir() {
        bail!("asset directory not found: {}", source.display());
    }

    let base = source
        .to_str()
        .with_context(|| format!("asset directory is not valid UTF-8: {}", source.display()))?;
    let pattern = format!("{}/**/*", glob::Pattern::escape(base.trim_end_matches('/')));

    let mut copied = 0;
    for entry in glob::glob(&pattern).with_context(|| format!("invalid asset pattern: {}", pattern))? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("skipping unreadable asset: {}", e);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let relative = path
            .strip_prefix(source)
            .with_context(|| format!("asset outside source directory: {}", path.display()))?;
        let dest = target.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::copy(&path, &dest)
            .with_context(|| format!("failed to copy {} to {}", path.display(), dest.display()))?;
        debug!(asset = %relative.display(), "copied asset");
        copied += 1;
    }
    Ok(copied)
}
