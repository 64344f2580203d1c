use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to launch {tool}: {source}")]
    ToolSpawn {
        tool: &'static str,
        source: std::io::Error,
    },

    #[error("{tool} failed (exit code {code}): {detail}")]
    ToolFailed {
        tool: &'static str,
        code: String,
        detail: String,
    },

    #[error("invalid page selection: {0}")]
    InvalidSelection(String),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl CoreError {
    /// Build a `ToolFailed` from a finished subprocess, pulling the exit
    /// code and trimmed stderr into the error message.
    pub(crate) fn tool_failed(tool: &'static str, output: &std::process::Output) -> Self {
        let code = output
            .status
            .code()
            .map_or_else(|| "unknown".to_string(), |c| c.to_string());
        let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
        CoreError::ToolFailed { tool, code, detail }
    }
}
