pub mod paths;
pub mod transcript_loader;

pub use paths::{
    STDIN_TARGET, TranscriptSource, collect_transcripts, find_session_transcript,
    get_claude_paths, latest_transcript, resolve_sources,
};
pub use transcript_loader::{
    load_sources, load_transcript, load_transcripts, parse_transcript, read_stdin_transcript,
};
