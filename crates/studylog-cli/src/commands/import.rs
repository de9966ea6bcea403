//! The `studylog import` command.

use std::path::PathBuf;

use anyhow::Result;

use studylog_core::catalog::import_catalog;

use super::Context;

pub fn execute(ctx: &Context, catalog_path: PathBuf) -> Result<()> {
    let (_, mut store) = ctx.open()?;

    let summary = import_catalog(&mut store, &catalog_path)?;
    store.save()?;

    println!(
        "Imported {}: {} new, {} updated, {} skipped",
        catalog_path.display(),
        summary.inserted,
        summary.updated,
        summary.skipped
    );
    Ok(())
}
