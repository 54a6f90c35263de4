/// Inclusive index slice handed to the range worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSlice {
    pub first: u64,
    pub last: u64,
}

/// The single loop-exit check of the invocation chain.
///
/// Stops when the next range would start beyond the known end of the
/// sequence, or when the worker declined further work and the trigger
/// was not a manual bootstrap. Manual triggers ignore
/// `continue_requested` as a stop reason; their flag only affects what
/// gets forwarded to the worker.
pub fn should_stop(
    next_first: u64,
    continue_requested: bool,
    latest_known_index: u64,
    is_manual: bool,
) -> bool {
    if latest_known_index < next_first {
        return true;
    }
    !is_manual && !continue_requested
}

/// Computes the next slice, clamped to the known upper bound.
///
/// Callers must have checked `should_stop` first; `next_first` is
/// assumed to be within the sequence.
pub fn next_slice(next_first: u64, step: u64, latest_known_index: u64) -> RangeSlice {
    debug_assert!(next_first <= latest_known_index);
    let last = next_first
        .saturating_add(step.saturating_sub(1))
        .min(latest_known_index);
    RangeSlice {
        first: next_first,
        last,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_beyond_the_known_end_regardless_of_flags() {
        for continue_requested in [false, true] {
            for is_manual in [false, true] {
                assert!(should_stop(3457, continue_requested, 3456, is_manual));
            }
        }
    }

    #[test]
    fn stops_when_worker_declines_and_trigger_is_not_manual() {
        assert!(should_stop(1001, false, 2_000_000, false));
    }

    #[test]
    fn continues_when_worker_requests_more_work() {
        assert!(!should_stop(1001, true, 2_000_000, false));
    }

    #[test]
    fn manual_triggers_ignore_continue_requested() {
        assert!(!should_stop(20001, false, 20500, true));
        assert!(!should_stop(20001, true, 20500, true));
    }

    #[test]
    fn slice_spans_a_full_step_when_room_remains() {
        let slice = next_slice(20001, 500, 2_000_000);
        assert_eq!(slice, RangeSlice { first: 20001, last: 20500 });
    }

    #[test]
    fn slice_is_clamped_to_the_known_end() {
        let slice = next_slice(20001, 500, 20300);
        assert_eq!(slice, RangeSlice { first: 20001, last: 20300 });
    }

    #[test]
    fn slice_invariants_hold_across_inputs() {
        let latest = 10_000u64;
        for first in [1u64, 9_500, 9_999, 10_000] {
            for step in [1u64, 499, 500, 100_000] {
                let slice = next_slice(first, step, latest);
                assert!(slice.first <= slice.last);
                assert!(slice.last <= latest);
                assert!(slice.last - slice.first + 1 <= step);
            }
        }
    }

    #[test]
    fn single_index_slice_at_the_boundary() {
        let slice = next_slice(3456, 500, 3456);
        assert_eq!(slice, RangeSlice { first: 3456, last: 3456 });
    }
}
