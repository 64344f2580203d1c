//! Session workspaces and the page extract-and-crop pipeline.
//!
//! This crate is thin glue around two external command-line tools: `pdftk`
//! for page counting and single-page extraction, and `pdf-crop-margins` for
//! trimming whitespace borders. It owns the process-wide temporary root,
//! the per-session `upload/` / `split/` / `download/` directory layout, and
//! the sequencing of the subprocess calls.

pub mod archive;
pub mod error;
pub mod inspect;
pub mod pipeline;
pub mod plan;
pub mod sanitize;
pub mod tools;
pub mod workspace;

pub use archive::build_archive;
pub use error::CoreError;
pub use plan::{ExtractionPlan, PageJob};
pub use sanitize::{file_stem, sanitize_filename};
pub use tools::Tools;
pub use workspace::{Workspace, WorkspaceRoot};
