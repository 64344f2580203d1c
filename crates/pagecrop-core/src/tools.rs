//! External tool configuration.

/// Commands for the two external tools the pipeline shells out to.
///
/// `pdftk` handles page counting and single-page extraction;
/// `pdf-crop-margins` trims whitespace borders. Both must be on `PATH`
/// unless overridden via environment.
#[derive(Debug, Clone)]
pub struct Tools {
    pub pdftk: String,
    pub pdfcrop: String,
}

impl Tools {
    /// Read tool commands from `PDFTK_BIN` / `PDFCROP_BIN`, falling back
    /// to the standard command names.
    pub fn from_env() -> Self {
        Self {
            pdftk: std::env::var("PDFTK_BIN").unwrap_or_else(|_| "pdftk".to_string()),
            pdfcrop: std::env::var("PDFCROP_BIN")
                .unwrap_or_else(|_| "pdf-crop-margins".to_string()),
        }
    }
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            pdftk: "pdftk".to_string(),
            pdfcrop: "pdf-crop-margins".to_string(),
        }
    }
}
