//! Translating a page selection and optional output names into an
//! extraction plan.

use crate::error::CoreError;
use crate::sanitize::sanitize_filename;

/// One selected page and the filename its cropped output will get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageJob {
    pub page: u32,
    pub output_name: String,
}

/// Ordered list of pages to extract and crop.
///
/// Selection order is preserved and duplicate pages are allowed; a page
/// selected twice is cropped twice under the same output name (the
/// pipeline extracts each distinct page only once).
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    pub jobs: Vec<PageJob>,
}

/// Parse a selection token, taking its last whitespace-delimited word as a
/// 1-based page index (form values look like `Page 3`).
pub fn parse_page_token(token: &str) -> Result<u32, CoreError> {
    token
        .split_whitespace()
        .last()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| CoreError::InvalidSelection(format!("unrecognized page token {token:?}")))
}

impl ExtractionPlan {
    /// Build a plan from the raw form inputs.
    ///
    /// Default output name for page `p` is `<stem>_<p>.pdf`. The names
    /// block holds one line per physical page position (blank = keep the
    /// default); only the first `num_pages` lines are considered, and
    /// user-supplied names are sanitized and suffixed with `.pdf`.
    ///
    /// An empty selection and indices outside `[1, num_pages]` are
    /// rejected.
    pub fn build(
        stem: &str,
        num_pages: u32,
        selected: &[String],
        names_block: &str,
    ) -> Result<Self, CoreError> {
        if selected.is_empty() {
            return Err(CoreError::InvalidSelection("no pages selected".to_string()));
        }

        let mut pages = Vec::with_capacity(selected.len());
        for token in selected {
            let page = parse_page_token(token)?;
            if page == 0 || page > num_pages {
                return Err(CoreError::InvalidSelection(format!(
                    "page {page} is out of range (document has {num_pages} pages)"
                )));
            }
            pages.push(page);
        }

        // 1-based lookup table; index 0 is never used.
        let mut names: Vec<String> = (0..=num_pages)
            .map(|p| format!("{stem}_{p}.pdf"))
            .collect();
        for (i, line) in names_block.lines().take(num_pages as usize).enumerate() {
            let custom = sanitize_filename(line.trim());
            if !custom.is_empty() {
                names[i + 1] = format!("{custom}.pdf");
            }
        }

        let jobs = pages
            .into_iter()
            .map(|page| PageJob {
                page,
                output_name: names[page as usize].clone(),
            })
            .collect();

        Ok(Self { jobs })
    }

    /// Output filenames in selection order.
    pub fn output_names(&self) -> Vec<String> {
        self.jobs.iter().map(|j| j.output_name.clone()).collect()
    }
}
