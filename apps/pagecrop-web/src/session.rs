//! Server-side session records.
//!
//! The browser cookie carries only an opaque token; everything else lives
//! in the in-memory session store keyed by that token.

use axum_extra::extract::cookie::CookieJar;

/// Name of the cookie holding the opaque session token.
pub const SESSION_COOKIE: &str = "pagecrop_session";

/// State held per browser session.
///
/// `sid` is the workspace directory id, set once a file has been uploaded.
/// A new upload overwrites the whole record; old workspaces stay on disk
/// until process shutdown.
#[derive(Debug, Clone, Default)]
pub struct SessionRecord {
    pub sid: Option<String>,
    pub filename: String,
    pub num_pages: u32,
    pub message: String,
    pub result: Option<ProcessOutcome>,
}

/// The most recent processing result, kept for the download step.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub stem: String,
    pub files: Vec<String>,
    pub archive: Option<String>,
}

/// Session token from the request's cookie jar, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}
