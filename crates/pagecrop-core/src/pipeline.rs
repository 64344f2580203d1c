//! The extract-and-crop pipeline.
//!
//! Every extraction subprocess is launched before any is awaited, so the
//! per-page `pdftk` startups overlap. Each distinct page is extracted
//! exactly once, even when selected more than once; two children must
//! never write the same `split/` file concurrently. Cropping then runs in
//! plan order, each crop strictly after its page's extraction has
//! finished. Any spawn failure or non-zero exit aborts the whole run;
//! there is no retry and no partial result.

use std::collections::HashMap;

use tokio::process::Command;

use crate::error::CoreError;
use crate::plan::ExtractionPlan;
use crate::tools::Tools;
use crate::workspace::Workspace;

/// Extract each planned page from the uploaded file and crop its margins,
/// writing final outputs into the workspace's `download/` directory.
/// Returns the produced filenames in plan order.
pub async fn extract_and_crop(
    tools: &Tools,
    workspace: &Workspace,
    source_name: &str,
    stem: &str,
    plan: &ExtractionPlan,
) -> Result<Vec<String>, CoreError> {
    let source = workspace.upload_dir().join(source_name);
    let split_dir = workspace.split_dir();
    let download_dir = workspace.download_dir();

    // Launch all extractions eagerly (one per distinct page), then
    // synchronize in plan order below.
    let mut pending: HashMap<u32, tokio::process::Child> = HashMap::new();
    for job in &plan.jobs {
        if pending.contains_key(&job.page) {
            continue;
        }
        let split_out = split_dir.join(format!("{stem}_{}.pdf", job.page));
        tracing::debug!("extracting page {} -> {}", job.page, split_out.display());
        let child = Command::new(&tools.pdftk)
            .arg(&source)
            .arg("cat")
            .arg(format!("{0}-{0}", job.page))
            .arg("output")
            .arg(&split_out)
            .spawn()
            .map_err(|e| CoreError::ToolSpawn {
                tool: "pdftk",
                source: e,
            })?;
        pending.insert(job.page, child);
    }

    let mut produced = Vec::with_capacity(plan.jobs.len());
    for job in &plan.jobs {
        // First occurrence of the page waits for its extraction; repeats
        // reuse the finished split file.
        if let Some(mut child) = pending.remove(&job.page) {
            let status = child.wait().await?;
            if !status.success() {
                return Err(CoreError::ToolFailed {
                    tool: "pdftk",
                    code: status
                        .code()
                        .map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                    detail: format!("extraction of page {} failed", job.page),
                });
            }
        }

        let split_out = split_dir.join(format!("{stem}_{}.pdf", job.page));
        let dest = download_dir.join(&job.output_name);
        tracing::debug!("cropping page {} -> {}", job.page, dest.display());
        let output = Command::new(&tools.pdfcrop)
            .args(["-s", "-u", "-p", "0", "-a", "0"])
            .arg(&split_out)
            .arg("-o")
            .arg(&dest)
            .output()
            .await
            .map_err(|e| CoreError::ToolSpawn {
                tool: "pdf-crop-margins",
                source: e,
            })?;
        if !output.status.success() {
            return Err(CoreError::tool_failed("pdf-crop-margins", &output));
        }

        produced.push(job.output_name.clone());
    }

    Ok(produced)
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::archive::build_archive;
    use crate::workspace::WorkspaceRoot;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    fn stub_tool(dir: &Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    // The pipeline invokes `<pdftk> <source> cat <p>-<p> output <dest>`
    // and `<pdfcrop> -s -u -p 0 -a 0 <input> -o <dest>`. The stubs copy
    // input to output; the extraction stub also tags the output with the
    // page range and logs each invocation.
    fn stub_tools(bin_dir: &Path) -> Tools {
        Tools {
            pdftk: stub_tool(
                bin_dir,
                "fake-pdftk",
                r#"cat "$1" > "$5"
echo "$3" >> "$5"
echo "$3" >> "$(dirname "$5")/calls.log""#,
            ),
            pdfcrop: stub_tool(bin_dir, "fake-crop", r#"cp "$7" "$9""#),
        }
    }

    fn workspace_with_upload(root: &WorkspaceRoot) -> Workspace {
        let ws = root.create_workspace().unwrap();
        std::fs::write(ws.upload_dir().join("doc.pdf"), "%PDF-1.7 source").unwrap();
        ws
    }

    fn sel(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn download_names(ws: &Workspace) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(ws.download_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_produces_one_output_per_selected_page_in_plan_order() {
        let root = WorkspaceRoot::new().unwrap();
        let ws = workspace_with_upload(&root);
        let bins = TempDir::new().unwrap();
        let tools = stub_tools(bins.path());

        let plan = ExtractionPlan::build("doc", 5, &sel(&["Page 3", "Page 1"]), "").unwrap();
        let produced = extract_and_crop(&tools, &ws, "doc.pdf", "doc", &plan)
            .await
            .unwrap();

        assert_eq!(produced, vec!["doc_3.pdf", "doc_1.pdf"]);
        assert_eq!(download_names(&ws), vec!["doc_1.pdf", "doc_3.pdf"]);

        // The cropped output descends from the upload via its extract.
        let cropped = std::fs::read_to_string(ws.download_dir().join("doc_3.pdf")).unwrap();
        assert!(cropped.contains("%PDF-1.7 source"));
        assert!(cropped.contains("3-3"));
    }

    #[tokio::test]
    async fn test_multiple_pages_then_archive_bundles_exactly_k_files() {
        let root = WorkspaceRoot::new().unwrap();
        let ws = workspace_with_upload(&root);
        let bins = TempDir::new().unwrap();
        let tools = stub_tools(bins.path());

        let plan =
            ExtractionPlan::build("doc", 4, &sel(&["Page 2", "Page 4", "Page 1"]), "").unwrap();
        let produced = extract_and_crop(&tools, &ws, "doc.pdf", "doc", &plan)
            .await
            .unwrap();
        assert_eq!(produced.len(), 3);

        let archive = build_archive(&ws.download_dir(), "doc", &produced).unwrap();
        assert_eq!(archive.as_deref(), Some("doc.zip"));

        let zip_file = std::fs::File::open(ws.download_dir().join("doc.zip")).unwrap();
        let zip = zip::ZipArchive::new(zip_file).unwrap();
        assert_eq!(zip.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_pages_extract_once_and_crop_each_occurrence() {
        let root = WorkspaceRoot::new().unwrap();
        let ws = workspace_with_upload(&root);
        let bins = TempDir::new().unwrap();
        let tools = stub_tools(bins.path());

        let plan =
            ExtractionPlan::build("doc", 3, &sel(&["Page 2", "Page 2", "Page 1"]), "").unwrap();
        let produced = extract_and_crop(&tools, &ws, "doc.pdf", "doc", &plan)
            .await
            .unwrap();

        assert_eq!(produced, vec!["doc_2.pdf", "doc_2.pdf", "doc_1.pdf"]);

        // One extraction per distinct page, not per occurrence.
        let calls = std::fs::read_to_string(ws.split_dir().join("calls.log")).unwrap();
        let mut ranges: Vec<&str> = calls.lines().collect();
        ranges.sort();
        assert_eq!(ranges, vec!["1-1", "2-2"]);
    }

    #[tokio::test]
    async fn test_failing_extraction_aborts_the_run() {
        let root = WorkspaceRoot::new().unwrap();
        let ws = workspace_with_upload(&root);
        let bins = TempDir::new().unwrap();
        let tools = Tools {
            pdftk: stub_tool(bins.path(), "fake-pdftk", "exit 2"),
            pdfcrop: stub_tool(bins.path(), "fake-crop", r#"cp "$7" "$9""#),
        };

        let plan = ExtractionPlan::build("doc", 3, &sel(&["Page 1"]), "").unwrap();
        let err = extract_and_crop(&tools, &ws, "doc.pdf", "doc", &plan)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ToolFailed { tool: "pdftk", .. }));
    }

    #[tokio::test]
    async fn test_failing_crop_aborts_the_run() {
        let root = WorkspaceRoot::new().unwrap();
        let ws = workspace_with_upload(&root);
        let bins = TempDir::new().unwrap();
        let tools = Tools {
            pdftk: stub_tool(bins.path(), "fake-pdftk", r#"cp "$1" "$5""#),
            pdfcrop: stub_tool(bins.path(), "fake-crop", "echo boom >&2\nexit 3"),
        };

        let plan = ExtractionPlan::build("doc", 3, &sel(&["Page 1"]), "").unwrap();
        let err = extract_and_crop(&tools, &ws, "doc.pdf", "doc", &plan)
            .await
            .unwrap_err();
        match err {
            CoreError::ToolFailed { tool, code, detail } => {
                assert_eq!(tool, "pdf-crop-margins");
                assert_eq!(code, "3");
                assert_eq!(detail, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
