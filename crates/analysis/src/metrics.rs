//! Percentage derivations over oracle-supplied index lists.
//!
//! The oracle's raw `selfTurnIndices` list is trusted as input, but the
//! percentage is always derived locally: a model's self-reported percentage
//! is routinely inconsistent with the index list it reports alongside it.

/// `(self_reference_percent, other_reference_percent)` for one speaker.
///
/// The pair always sums to 100, except for a speaker with zero turns where
/// both are 0 — defined, not an error.
pub fn self_reference_percents(self_turn_count: usize, total_turns: usize) -> (u8, u8) {
    if total_turns == 0 {
        return (0, 0);
    }
    let self_percent = (self_turn_count as f64 / total_turns as f64 * 100.0).round() as u8;
    let self_percent = self_percent.min(100);
    (self_percent, 100 - self_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percents_always_sum_to_100() {
        for (self_turns, total) in [(0, 4), (2, 6), (3, 3), (1, 7)] {
            let (s, o) = self_reference_percents(self_turns, total);
            assert_eq!(s as u32 + o as u32, 100, "{self_turns}/{total}");
        }
    }

    #[test]
    fn zero_turns_is_defined_as_zero_zero() {
        assert_eq!(self_reference_percents(0, 0), (0, 0));
        assert_eq!(self_reference_percents(3, 0), (0, 0));
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(self_reference_percents(2, 6), (33, 67));
        assert_eq!(self_reference_percents(1, 3), (33, 67));
        assert_eq!(self_reference_percents(2, 3), (67, 33));
    }

    #[test]
    fn oversized_index_lists_saturate() {
        // An oracle listing more self turns than the speaker has turns must
        // not underflow the complement.
        assert_eq!(self_reference_percents(9, 4), (100, 0));
    }
}
