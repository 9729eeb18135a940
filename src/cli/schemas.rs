use anyhow::{Context, Result};
use std::path::Path;

use reap::fncall::catalog::ToolCatalog;

/// Write each tool's parameter schema to `<dir>/<tool>.json`.
pub fn schemas(out: &Path) -> Result<()> {
    let catalog = ToolCatalog::new().context("failed to derive tool schemas")?;
    let written = catalog.write_schemas(out)?;

    println!("Wrote {} schema(s) to {}", written.len(), out.display());
    for path in &written {
        println!("  {}", path.display());
    }

    Ok(())
}
