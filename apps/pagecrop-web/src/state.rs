//! Application state: the workspace root, tool configuration, and the
//! session store.

use std::collections::HashMap;

use pagecrop_core::{CoreError, Tools, WorkspaceRoot};
use tokio::sync::RwLock;

use crate::session::SessionRecord;

/// Shared state behind every handler.
///
/// Sessions live in an in-memory map keyed by the cookie token. The
/// workspace root is a temporary directory removed when this state is
/// dropped at process shutdown.
pub struct AppState {
    pub root: WorkspaceRoot,
    pub tools: Tools,
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl AppState {
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            root: WorkspaceRoot::new()?,
            tools: Tools::from_env(),
            sessions: RwLock::new(HashMap::new()),
        })
    }

    pub async fn get_session(&self, token: &str) -> Option<SessionRecord> {
        self.sessions.read().await.get(token).cloned()
    }

    pub async fn put_session(&self, token: String, record: SessionRecord) {
        self.sessions.write().await.insert(token, record);
    }

    pub async fn remove_session(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_put_then_get_roundtrips() {
        let state = AppState::new().unwrap();
        let record = SessionRecord {
            filename: "doc.pdf".to_string(),
            num_pages: 4,
            ..Default::default()
        };
        state.put_session("tok".to_string(), record).await;

        let got = state.get_session("tok").await.unwrap();
        assert_eq!(got.filename, "doc.pdf");
        assert_eq!(got.num_pages, 4);
    }

    #[tokio::test]
    async fn test_unknown_token_is_none() {
        let state = AppState::new().unwrap();
        assert!(state.get_session("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_remove_clears_record() {
        let state = AppState::new().unwrap();
        state
            .put_session("tok".to_string(), SessionRecord::default())
            .await;
        state.remove_session("tok").await;
        assert!(state.get_session("tok").await.is_none());
    }
}
