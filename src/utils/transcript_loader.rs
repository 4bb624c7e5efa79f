use crate::error::{CtxError, Result};
use crate::types::LogEntry;
use crate::utils::paths::TranscriptSource;
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tokio::task;

/// Decode one JSON object per line. Blank lines are ignored; lines that fail
/// to decode are logged and skipped so one corrupt record never sinks the
/// whole session.
pub fn parse_transcript(content: &str) -> Vec<LogEntry> {
    let lines: Vec<&str> = content.lines().collect();

    lines
        .par_iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str::<LogEntry>(line) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(line = index + 1, error = %err, "skipping malformed transcript line");
                None
            }
        })
        .collect()
}

/// Read and decode a transcript file
pub async fn load_transcript(transcript_path: &Path) -> Result<Vec<LogEntry>> {
    let content = async_fs::read_to_string(transcript_path)
        .await
        .map_err(|source| CtxError::FileRead {
            path: transcript_path.to_path_buf(),
            source,
        })?;

    let entries = task::spawn_blocking(move || parse_transcript(&content)).await?;
    tracing::debug!(path = %transcript_path.display(), entries = entries.len(), "loaded transcript");
    Ok(entries)
}

/// Load several transcripts concurrently, keeping input order
pub async fn load_transcripts(paths: &[PathBuf]) -> Result<Vec<Vec<LogEntry>>> {
    let tasks: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| tokio::spawn(async move { load_transcript(&path).await }))
        .collect();

    let mut sessions = Vec::with_capacity(tasks.len());
    for task in tasks {
        sessions.push(task.await??);
    }
    Ok(sessions)
}

/// Load resolved sources concurrently, keeping input order
pub async fn load_sources(sources: &[TranscriptSource]) -> Result<Vec<Vec<LogEntry>>> {
    let tasks: Vec<_> = sources
        .iter()
        .cloned()
        .map(|source| {
            tokio::spawn(async move {
                match source {
                    TranscriptSource::Stdin => read_stdin_transcript().await,
                    TranscriptSource::File(path) => load_transcript(&path).await,
                }
            })
        })
        .collect();

    let mut sessions = Vec::with_capacity(tasks.len());
    for task in tasks {
        sessions.push(task.await??);
    }
    Ok(sessions)
}

/// Decode a transcript piped through stdin
pub async fn read_stdin_transcript() -> Result<Vec<LogEntry>> {
    let content = task::spawn_blocking(|| {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    })
    .await??;

    Ok(parse_transcript(&content))
}
