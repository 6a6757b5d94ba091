//! Fast-path streak detectors over a topic's answer history.
//!
//! Both scans expect the history ordered newest-first, as the store
//! delivers it.

use crate::engine::types::AnswerSample;

/// "Can raise now": true iff the most recent `needed_correct` answers are
/// all correct. The first incorrect answer aborts the scan.
pub fn can_raise(history_newest_first: &[AnswerSample], needed_correct: usize) -> bool {
    if needed_correct == 0 {
        return false;
    }

    let mut remaining = needed_correct;
    for sample in history_newest_first {
        if !sample.is_correct() {
            return false;
        }
        remaining -= 1;
        if remaining == 0 {
            return true;
        }
    }
    false
}

/// "Can close now": true iff the history contains a run of `needed_wrong`
/// consecutive zero-score answers anywhere, and at least `min_answered`
/// answers exist. Any positive-score answer resets the running streak.
pub fn can_close(
    history_newest_first: &[AnswerSample],
    needed_wrong: usize,
    min_answered: usize,
) -> bool {
    if needed_wrong == 0 || history_newest_first.len() < min_answered {
        return false;
    }

    let mut streak = 0usize;
    for sample in history_newest_first {
        if sample.is_correct() {
            streak = 0;
        } else {
            streak += 1;
            if streak >= needed_wrong {
                return true;
            }
        }
    }
    false
}
