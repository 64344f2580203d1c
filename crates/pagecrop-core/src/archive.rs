//! Bundling produced pages into a zip archive.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::CoreError;

/// Bundle the produced files into `<stem>.zip` inside `download_dir`.
///
/// A single file is its own deliverable, so no archive is built and `None`
/// is returned. With two or more files, every one is added under its bare
/// filename (no directory prefix) and the archive name is returned.
pub fn build_archive(
    download_dir: &Path,
    stem: &str,
    files: &[String],
) -> Result<Option<String>, CoreError> {
    if files.len() < 2 {
        return Ok(None);
    }

    let archive_name = format!("{stem}.zip");
    let file = File::create(download_dir.join(&archive_name))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for name in files {
        zip.start_file(name.clone(), options)?;
        let bytes = std::fs::read(download_dir.join(name))?;
        zip.write_all(&bytes)?;
    }
    zip.finish()?;

    Ok(Some(archive_name))
}
