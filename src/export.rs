use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use crate::controller::{Controller, OutputId};

/// Write every chart region of `controller` to `<dir>/<output-id>.json`.
///
/// A region holding a selection error is written as `{"error": "..."}` so
/// one rejected control never prevents the other chart from being exported.
pub fn export_regions(controller: &Controller, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;

    let mut written = Vec::new();
    for output in OutputId::ALL {
        let Some(content) = controller.region(output) else {
            continue;
        };
        let value = match content {
            Ok(spec) => serde_json::to_value(spec).context("serializing chart spec")?,
            Err(e) => json!({ "error": e.to_string() }),
        };

        let path = dir.join(format!("{}.json", output.id()));
        let text = serde_json::to_string_pretty(&value).context("formatting chart spec")?;
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {output} to {}", path.display());
        written.push(path);
    }
    Ok(written)
}
