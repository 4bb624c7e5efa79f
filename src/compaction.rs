//! Compaction detection and session segmentation.

use crate::constants::{COMPACTION_DROP_RATIO, POST_COMPACT_LABEL, PRE_COMPACT_LABEL};
use crate::types::{CompactEvent, Elapsed, SessionSegment, Turn, sum_tokens};
use std::iter;

/// A context drop to strictly less than half of a positive previous context
#[inline]
pub fn is_compaction(previous_context: i64, current_context: i64) -> bool {
    previous_context > 0 && (current_context as f64) < previous_context as f64 * COMPACTION_DROP_RATIO
}

/// One event per adjacent pair of turns whose context collapsed
pub fn detect_compactions(turns: &[Turn]) -> Vec<CompactEvent> {
    turns
        .windows(2)
        .filter(|pair| is_compaction(pair[0].context_tokens, pair[1].context_tokens))
        .map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            CompactEvent {
                turn_index: current.turn_index,
                timestamp: current.timestamp.clone(),
                before_tokens: previous.context_tokens,
                after_tokens: current.context_tokens,
                tokens_saved: previous.context_tokens.saturating_sub(current.context_tokens),
            }
        })
        .collect()
}

/// Partition `turns` at every compaction. `compactions` must be sorted by
/// turn index, which [`detect_compactions`] guarantees.
pub fn build_segments(
    turns: &[Turn],
    compactions: &[CompactEvent],
    context_window: u64,
) -> Vec<SessionSegment> {
    let boundaries = compactions
        .iter()
        .map(|event| event.turn_index.min(turns.len()))
        .chain(iter::once(turns.len()));

    let mut segments: Vec<SessionSegment> = Vec::new();
    let mut start = 0;

    for boundary in boundaries {
        let slice = turns.get(start..boundary).unwrap_or(&[]);
        start = start.max(boundary);

        let (Some(first), Some(last)) = (slice.first(), slice.last()) else {
            continue;
        };

        let index = segments.len();
        let label = if index == 0 {
            PRE_COMPACT_LABEL.to_string()
        } else {
            format!("{} #{}", POST_COMPACT_LABEL, index)
        };
        let peak_context = slice.iter().map(|t| t.context_tokens).max().unwrap_or(0);

        segments.push(SessionSegment {
            index,
            label,
            start_turn: first.turn_index,
            end_turn: last.turn_index,
            turns: slice.to_vec(),
            peak_context,
            peak_context_percent: percent_of_window(peak_context, context_window),
            total_tokens: sum_tokens(slice.iter().map(|t| t.token_delta)),
            duration: Elapsed::between(&first.timestamp, &last.timestamp),
            start_time: first.timestamp.clone(),
            end_time: last.timestamp.clone(),
        });
    }

    segments
}

pub fn percent_of_window(tokens: i64, context_window: u64) -> f64 {
    if context_window == 0 {
        return 0.0;
    }
    tokens as f64 / context_window as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MODEL_CONTEXT_WINDOW;
    use crate::test_support::turns;

    fn contexts(values: &[i64]) -> Vec<Turn> {
        turns(values.iter().map(|&v| (v, None)).collect())
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_compaction(50_000, 25_000));
        assert!(is_compaction(50_000, 24_999));
        assert!(!is_compaction(0, -10));
        assert!(!is_compaction(-100, -500));
    }

    #[test]
    fn test_single_compaction_scenario() {
        let turns = contexts(&[50_000, 20_000, 25_000]);
        assert_eq!(
            turns.iter().map(|t| t.token_delta).collect::<Vec<_>>(),
            vec![50_000, -30_000, 5_000]
        );

        let events = detect_compactions(&turns);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].turn_index, 1);
        assert_eq!(events[0].before_tokens, 50_000);
        assert_eq!(events[0].after_tokens, 20_000);
        assert_eq!(events[0].tokens_saved, 30_000);

        let segments = build_segments(&turns, &events, MODEL_CONTEXT_WINDOW);
        assert_eq!(segments.len(), 2);

        assert_eq!(segments[0].label, "Pre-compact");
        assert_eq!((segments[0].start_turn, segments[0].end_turn), (0, 0));
        assert_eq!(segments[0].peak_context, 50_000);
        assert_eq!(segments[0].peak_context_percent, 25.0);
        assert_eq!(segments[0].total_tokens, 50_000);

        assert_eq!(segments[1].label, "Post-compact #1");
        assert_eq!((segments[1].start_turn, segments[1].end_turn), (1, 2));
        assert_eq!(segments[1].turn_count(), 2);
        assert_eq!(segments[1].peak_context, 25_000);
        assert_eq!(segments[1].total_tokens, -25_000);
        assert_eq!(segments[1].duration.minutes(), 1);
    }

    #[test]
    fn test_consecutive_compactions() {
        let turns = contexts(&[100_000, 40_000, 10_000, 12_000, 3_000]);
        let events = detect_compactions(&turns);
        assert_eq!(
            events.iter().map(|e| e.turn_index).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );

        let segments = build_segments(&turns, &events, MODEL_CONTEXT_WINDOW);
        let labels: Vec<&str> = segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Pre-compact", "Post-compact #1", "Post-compact #2", "Post-compact #3"]
        );
    }

    #[test]
    fn test_segments_partition_turns() {
        let turns = contexts(&[10, 90_000, 1_000, 5_000, 80_000, 100, 200]);
        let events = detect_compactions(&turns);
        let segments = build_segments(&turns, &events, MODEL_CONTEXT_WINDOW);

        let covered: Vec<usize> = segments
            .iter()
            .flat_map(|s| s.turns.iter().map(|t| t.turn_index))
            .collect();
        assert_eq!(covered, (0..turns.len()).collect::<Vec<_>>());
        assert_eq!(
            segments.iter().map(|s| s.turn_count()).sum::<usize>(),
            turns.len()
        );
        assert_eq!(segments[0].label, "Pre-compact");

        let peak = turns.iter().map(|t| t.context_tokens).max().unwrap();
        assert_eq!(segments.iter().map(|s| s.peak_context).max().unwrap(), peak);
    }

    #[test]
    fn test_no_compactions_single_segment() {
        let turns = contexts(&[1_000, 2_000, 3_000]);
        let segments = build_segments(&turns, &detect_compactions(&turns), MODEL_CONTEXT_WINDOW);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].label, "Pre-compact");
        assert_eq!(segments[0].total_tokens, 3_000);
    }

    #[test]
    fn test_duplicate_boundary_skips_empty_slice() {
        let turns = contexts(&[100_000, 10_000, 9_000]);
        let mut events = detect_compactions(&turns);
        events.push(events[0].clone());

        let segments = build_segments(&turns, &events, MODEL_CONTEXT_WINDOW);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].label, "Post-compact #1");
        assert_eq!(segments[1].index, 1);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(detect_compactions(&[]).is_empty());
        assert!(detect_compactions(&contexts(&[5_000])).is_empty());
        assert!(build_segments(&[], &[], MODEL_CONTEXT_WINDOW).is_empty());
        assert_eq!(percent_of_window(100, 0), 0.0);
    }
}
