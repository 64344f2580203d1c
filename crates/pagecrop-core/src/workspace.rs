//! Per-session workspace directories under a process-wide temporary root.
//!
//! Each session owns one directory keyed by a generated id, with three
//! subdirectories: `upload/` for the raw file, `split/` for intermediate
//! single-page extracts, and `download/` for final cropped outputs. The
//! three are always created together. Sessions accumulate until the root
//! is dropped; there is no per-session teardown.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uuid::Uuid;

use crate::error::CoreError;

const UPLOAD_DIR: &str = "upload";
const SPLIT_DIR: &str = "split";
const DOWNLOAD_DIR: &str = "download";

/// The process-wide workspace root.
///
/// Backed by a [`TempDir`], so the entire tree (every session) is removed
/// exactly once, when this value is dropped at process shutdown.
pub struct WorkspaceRoot {
    dir: TempDir,
}

impl WorkspaceRoot {
    pub fn new() -> Result<Self, CoreError> {
        let dir = tempfile::Builder::new().prefix("pagecrop-").tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a fresh session workspace with all three subdirectories.
    /// Directory-creation errors propagate and fail the request.
    pub fn create_workspace(&self) -> Result<Workspace, CoreError> {
        let sid = Uuid::new_v4().to_string();
        let dir = self.dir.path().join(&sid);
        for sub in [UPLOAD_DIR, SPLIT_DIR, DOWNLOAD_DIR] {
            fs::create_dir_all(dir.join(sub))?;
        }
        Ok(Workspace { sid, dir })
    }

    /// Handle to an existing session workspace. The id must be one this
    /// root issued; callers check [`Workspace::exists`] before relying on
    /// the directories.
    pub fn workspace(&self, sid: &str) -> Workspace {
        Workspace {
            sid: sid.to_string(),
            dir: self.dir.path().join(sid),
        }
    }
}

/// One session's directory tree.
#[derive(Debug, Clone)]
pub struct Workspace {
    sid: String,
    dir: PathBuf,
}

impl Workspace {
    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.dir.join(UPLOAD_DIR)
    }

    pub fn split_dir(&self) -> PathBuf {
        self.dir.join(SPLIT_DIR)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.dir.join(DOWNLOAD_DIR)
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_workspace_makes_all_subdirectories() {
        let root = WorkspaceRoot::new().unwrap();
        let ws = root.create_workspace().unwrap();

        assert!(ws.exists());
        assert!(ws.upload_dir().is_dir());
        assert!(ws.split_dir().is_dir());
        assert!(ws.download_dir().is_dir());
    }

    #[test]
    fn test_workspaces_get_distinct_ids() {
        let root = WorkspaceRoot::new().unwrap();
        let a = root.create_workspace().unwrap();
        let b = root.create_workspace().unwrap();
        assert_ne!(a.sid(), b.sid());
    }

    #[test]
    fn test_unknown_sid_does_not_exist() {
        let root = WorkspaceRoot::new().unwrap();
        assert!(!root.workspace("no-such-session").exists());
    }

    #[test]
    fn test_root_drop_removes_every_session() {
        let root = WorkspaceRoot::new().unwrap();
        let ws = root.create_workspace().unwrap();
        let upload = ws.upload_dir();
        std::fs::write(upload.join("doc.pdf"), b"%PDF-1.7").unwrap();

        let base = root.path().to_path_buf();
        drop(root);
        assert!(!base.exists());
        assert!(!upload.exists());
    }
}
