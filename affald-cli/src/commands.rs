use std::fs;
use std::io::{Result as IoResult, Write};
use std::path::Path;

use affald_core::{AffaldService, resolve_icons};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

/// Print every sensor state as pretty JSON.
pub(crate) fn write_status<W: Write>(
    out: &mut W,
    service: &AffaldService,
    today: NaiveDate,
) -> Result<()> {
    let states = service.states(today);
    serde_json::to_writer_pretty(&mut *out, &states)?;
    writeln!(out)?;
    Ok(())
}

/// Print the identifiers for `label` and the picture URL a host would publish.
pub(crate) fn write_icons<W: Write>(out: &mut W, label: &str) -> IoResult<()> {
    let selection = resolve_icons(label);
    writeln!(out, "{}", selection.identifiers().join(", "))?;
    writeln!(out, "{}", selection.picture().url())
}

/// Draw the picture for the comma separated `images` list into `output`.
pub(crate) async fn write_picture(
    service: &AffaldService,
    images: &str,
    output: &Path,
) -> Result<usize> {
    let png = service
        .picture(Some(images))
        .await
        .map_err(|err| anyhow!("{err} (HTTP {})", err.status().http_code()))?;
    fs::write(output, &png).with_context(|| format!("failed to write {}", output.display()))?;
    Ok(png.len())
}
