use crate::error::{CtxError, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const TRANSCRIPT_EXTENSION: &str = "jsonl";

/// Target naming standard input
pub const STDIN_TARGET: &str = "-";

/// Where one session's transcript is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource {
    Stdin,
    File(PathBuf),
}

/// Existing Claude data directories for the current user
pub fn get_claude_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home_path) = home::home_dir() {
        // Primary path
        paths.push(home_path.join(".claude"));

        // macOS paths
        paths.push(home_path.join("Library/Application Support/Claude"));

        // Linux paths
        paths.push(home_path.join(".config/Claude"));
        paths.push(home_path.join(".local/share/Claude"));
    }

    // Windows paths
    if let Some(appdata) = std::env::var_os("APPDATA") {
        paths.push(PathBuf::from(appdata).join("Claude"));
    }

    paths.into_iter().filter(|p| p.exists()).collect()
}

/// Every `projects/<project>/<session>.jsonl` under the given data directories
pub fn collect_transcripts(claude_paths: &[PathBuf]) -> Vec<PathBuf> {
    let project_dirs: Vec<PathBuf> = claude_paths
        .iter()
        .map(|base| base.join("projects"))
        .filter_map(|projects| fs::read_dir(projects).ok())
        .flat_map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
                .map(|entry| entry.path())
        })
        .collect();

    let mut transcripts: Vec<PathBuf> = project_dirs
        .par_iter()
        .flat_map_iter(|dir| {
            fs::read_dir(dir)
                .into_iter()
                .flatten()
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| is_transcript(path))
        })
        .collect();
    transcripts.sort();
    transcripts
}

fn is_transcript(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TRANSCRIPT_EXTENSION)
}

/// Resolve a transcript by file path, or by session id (the file stem)
pub fn find_session_transcript(claude_paths: &[PathBuf], query: &str) -> Result<PathBuf> {
    let direct = PathBuf::from(query);
    if direct.is_file() {
        return Ok(direct);
    }

    collect_transcripts(claude_paths)
        .into_iter()
        .find(|path| path.file_stem().is_some_and(|stem| stem == query))
        .ok_or_else(|| CtxError::SessionNotFound {
            query: query.to_string(),
        })
}

/// Most recently modified transcript across all data directories
pub fn latest_transcript(claude_paths: &[PathBuf]) -> Result<PathBuf> {
    collect_transcripts(claude_paths)
        .into_iter()
        .filter_map(|path| {
            let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
            Some((modified, path))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
        .ok_or(CtxError::NoTranscripts)
}

/// Resolve command-line targets in order. `-` is standard input and may
/// appear once; no targets means the latest transcript.
pub fn resolve_sources(claude_paths: &[PathBuf], targets: &[String]) -> Result<Vec<TranscriptSource>> {
    if targets.is_empty() {
        if claude_paths.is_empty() {
            return Err(CtxError::ClaudePathNotFound);
        }
        return Ok(vec![TranscriptSource::File(latest_transcript(claude_paths)?)]);
    }

    if targets.iter().filter(|t| *t == STDIN_TARGET).count() > 1 {
        return Err(CtxError::StdinRepeated);
    }

    targets
        .iter()
        .map(|target| {
            if target == STDIN_TARGET {
                Ok(TranscriptSource::Stdin)
            } else {
                find_session_transcript(claude_paths, target).map(TranscriptSource::File)
            }
        })
        .collect()
}
