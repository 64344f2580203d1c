//! HTTP handlers for the upload/select/crop/download flow.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar},
    Form,
};
use pagecrop_core::{
    build_archive, file_stem, inspect, pipeline, sanitize_filename, CoreError, ExtractionPlan,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::page;
use crate::session::{session_token, ProcessOutcome, SESSION_COOKIE};
use crate::state::AppState;

/// `GET /` — render the session status page.
///
/// If the session's workspace no longer exists on disk (an earlier process
/// instance owned it), the stale record is dropped and the page renders
/// empty.
pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    let record = match session_token(&jar) {
        Some(token) => match state.get_session(&token).await {
            Some(record) => {
                let stale = record
                    .sid
                    .as_deref()
                    .is_some_and(|sid| !state.root.workspace(sid).exists());
                if stale {
                    state.remove_session(&token).await;
                    None
                } else {
                    Some(record)
                }
            }
            None => None,
        },
        None => None,
    };

    Html(page::render(record.as_ref()))
}

/// `POST /upload` — receive the PDF, store it in a fresh workspace, and
/// record its page count. Missing or unreadable files are user errors
/// surfaced as a status message, not server errors.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), AppError> {
    let mut uploaded: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidRequest(format!("failed to read upload: {e}")))?;
            uploaded = Some((filename, data.to_vec()));
            break;
        }
    }

    let token = session_token(&jar).unwrap_or_else(|| Uuid::new_v4().to_string());
    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, token.clone()))
            .path("/")
            .http_only(true)
            .build(),
    );

    // A new upload discards any previous page count and result.
    let mut record = state.get_session(&token).await.unwrap_or_default();
    record.num_pages = 0;
    record.result = None;

    match uploaded {
        None => {
            record.message = "No file part".to_string();
        }
        Some((raw_name, _)) if sanitize_filename(&raw_name).is_empty() => {
            record.message = "No selected file".to_string();
        }
        Some((raw_name, data)) => {
            let filename = sanitize_filename(&raw_name);
            let workspace = state.root.create_workspace()?;
            let path = workspace.upload_dir().join(&filename);
            tokio::fs::write(&path, &data).await.map_err(CoreError::from)?;

            let num_pages = inspect::page_count(&state.tools, &path).await?;
            record.sid = Some(workspace.sid().to_string());
            record.filename = filename.clone();
            if num_pages == 0 {
                record.message = "No page found".to_string();
            } else {
                record.num_pages = num_pages;
                record.message = format!("File '{filename}' has {num_pages} pages.");
                tracing::info!(
                    "uploaded '{}' ({} pages) into session {}",
                    filename,
                    num_pages,
                    workspace.sid()
                );
            }
        }
    }

    state.put_session(token, record).await;
    Ok((jar, Redirect::to("/")))
}

#[derive(Debug, Deserialize)]
pub struct ProcessForm {
    #[serde(default)]
    pub selected_pages: Vec<String>,
    #[serde(default)]
    pub filenames: String,
}

/// `POST /process` — extract and crop the selected pages, then bundle them
/// if more than one was produced. Bad selections are user errors; external
/// tool failures are fatal for the request.
pub async fn process(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ProcessForm>,
) -> Result<Redirect, AppError> {
    let token = session_token(&jar).ok_or(AppError::SessionNotFound)?;
    let mut record = state
        .get_session(&token)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let sid = record.sid.clone().ok_or(AppError::SessionNotFound)?;
    if record.num_pages == 0 {
        return Err(AppError::InvalidRequest(
            "no document with pages has been uploaded".to_string(),
        ));
    }

    let workspace = state.root.workspace(&sid);
    let stem = file_stem(&record.filename).to_string();

    let plan = match ExtractionPlan::build(
        &stem,
        record.num_pages,
        &form.selected_pages,
        &form.filenames,
    ) {
        Ok(plan) => plan,
        Err(CoreError::InvalidSelection(msg)) => {
            record.message = format!("Invalid selection: {msg}");
            state.put_session(token, record).await;
            return Ok(Redirect::to("/"));
        }
        Err(e) => return Err(e.into()),
    };

    let files =
        pipeline::extract_and_crop(&state.tools, &workspace, &record.filename, &stem, &plan)
            .await?;

    let archive = {
        let download_dir = workspace.download_dir();
        let stem = stem.clone();
        let files = files.clone();
        tokio::task::spawn_blocking(move || build_archive(&download_dir, &stem, &files))
            .await
            .map_err(|e| AppError::Internal(e.into()))??
    };

    tracing::info!(
        "processed {} page(s) for session {} (archive: {:?})",
        files.len(),
        sid,
        archive
    );

    record.result = Some(ProcessOutcome {
        stem,
        files,
        archive,
    });
    record.message = "Success".to_string();
    state.put_session(token, record).await;
    Ok(Redirect::to("/"))
}

/// `GET /download/:filename` — serve a produced file from the session's
/// download directory as an attachment. No listing is exposed; anything
/// not present there is a 404.
pub async fn download(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(filename): Path<String>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), AppError> {
    let token = session_token(&jar).ok_or(AppError::SessionNotFound)?;
    let record = state
        .get_session(&token)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let sid = record.sid.ok_or(AppError::SessionNotFound)?;

    let filename = sanitize_filename(&filename);
    let path = state.root.workspace(&sid).download_dir().join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::FileNotFound(filename.clone()))?;

    tracing::info!("download {} ({} bytes)", filename, bytes.len());

    let content_type = if filename.ends_with(".zip") {
        "application/zip"
    } else {
        "application/pdf"
    };

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), content_type.to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
