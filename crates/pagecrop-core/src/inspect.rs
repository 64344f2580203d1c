//! Page-count inspection via `pdftk dump_data`.

use std::path::Path;

use tokio::process::Command;

use crate::error::CoreError;
use crate::tools::Tools;

/// Number of pages in a PDF, as reported by `pdftk <file> dump_data`.
///
/// A document pdftk cannot read reports zero pages; only failure to launch
/// the tool itself is an error. Zero is the caller's "no page found"
/// signal.
pub async fn page_count(tools: &Tools, pdf: &Path) -> Result<u32, CoreError> {
    let output = Command::new(&tools.pdftk)
        .arg(pdf)
        .arg("dump_data")
        .output()
        .await
        .map_err(|e| CoreError::ToolSpawn {
            tool: "pdftk",
            source: e,
        })?;

    if !output.status.success() {
        tracing::debug!(
            "pdftk dump_data failed for {}: {}",
            pdf.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(0);
    }

    Ok(parse_num_pages(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse the `NumberOfPages` line out of `dump_data` output. Returns 0 if
/// the line is absent or malformed.
pub fn parse_num_pages(dump: &str) -> u32 {
    for line in dump.lines() {
        if line.starts_with("NumberOfPages") {
            if let Some(n) = line.split_whitespace().last().and_then(|t| t.parse().ok()) {
                return n;
            }
        }
    }
    0
}
